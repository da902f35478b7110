//! Main application state and render loop.

use chrono::Local;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::Terminal;
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

use inquiry_core::{InquiryConfig, InquiryController, InquiryError};

use crate::action::{Action, InputMode, Prompt};
use crate::clipboard::SystemClipboard;
use crate::components::confirm_dialog::ConfirmDialogComponent;
use crate::components::help::HelpComponent;
use crate::components::inquiry_form::InquiryFormComponent;
use crate::components::status_bar::StatusBarComponent;
use crate::components::summary_panel::SummaryPanelComponent;
use crate::components::Component;
use crate::event::{self, EventHandler, InputModeFlag};

const INVALID_FORM: &str = "Please fill in all required fields correctly.";
const COPIED: &str = "✓ Copied!";
const COPY_FAILED: &str =
    "Failed to copy to clipboard. Please try manually selecting and copying the text.";

/// Main application state.
pub struct App {
    /// Per-session state: unsaved edits and the current submission.
    controller: InquiryController,
    /// Whether the app should exit.
    should_quit: bool,
    /// Shared flag to tell the EventHandler which key-mapping to use.
    input_mode_flag: InputModeFlag,
    /// Opened on first copy or paste.
    clipboard: SystemClipboard,

    // Components
    form: InquiryFormComponent,
    summary: SummaryPanelComponent,
    confirm: ConfirmDialogComponent,
    status_bar: StatusBarComponent,
    help: HelpComponent,
}

impl App {
    pub fn new(config: InquiryConfig) -> Self {
        Self {
            controller: InquiryController::new(config),
            should_quit: false,
            input_mode_flag: event::new_input_mode_flag(),
            clipboard: SystemClipboard::new(),
            form: InquiryFormComponent::new(Local::now().date_naive()),
            summary: SummaryPanelComponent::new(),
            confirm: ConfirmDialogComponent::new(),
            status_bar: StatusBarComponent::new(),
            help: HelpComponent::new(),
        }
    }

    /// Run the TUI application.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Set up terminal.
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Create the action channel.
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

        // Start the event handler with the shared input mode flag.
        let mode_flag = self.input_mode_flag.clone();
        let event_handler = EventHandler::new(tx, Duration::from_millis(100), mode_flag);
        tokio::spawn(async move {
            event_handler.run().await;
        });

        // The form opens ready for typing.
        self.sync_input_mode();
        info!("Inquiry form opened");

        // Main loop.
        loop {
            // Render.
            terminal.draw(|frame| {
                self.render(frame);
            })?;

            // Process actions.
            match rx.recv().await {
                Some(action) => {
                    self.handle_action(&action);
                    if self.should_quit {
                        break;
                    }
                }
                None => break,
            }
        }

        // Restore terminal.
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn summary_visible(&self) -> bool {
        self.controller.submission().is_some()
    }

    /// Set the correct input mode for the visible view. Called after every action.
    fn sync_input_mode(&self) {
        let mode = self.current_input_mode();
        event::set_input_mode(&self.input_mode_flag, mode);
    }

    /// What input mode should be active right now?
    fn current_input_mode(&self) -> InputMode {
        // Overlays answer to y/n/Esc, so they need the shortcut keymap.
        if self.help.visible || self.confirm.is_open() || self.summary_visible() {
            InputMode::Normal
        } else {
            InputMode::Editing
        }
    }

    /// Dispatch an action to the overlay or view that owns it.
    fn handle_action(&mut self, action: &Action) {
        // Ctrl+C asks once when input would be lost; a second press forces it.
        if *action == Action::Quit {
            if self.controller.should_guard_exit() && self.confirm.prompt != Some(Prompt::Quit) {
                self.help.visible = false;
                self.confirm.open(Prompt::Quit);
                self.sync_input_mode();
            } else {
                self.should_quit = true;
            }
            return;
        }

        if self.help.visible || *action == Action::ToggleHelp {
            self.help.handle_action(action);
        } else if self.confirm.is_open() {
            self.answer_prompt(action);
        } else {
            self.dispatch(action);
        }

        // Always forward to the status bar for ticks and messages.
        self.status_bar.handle_action(action);

        self.sync_input_mode();
    }

    fn dispatch(&mut self, action: &Action) {
        if *action == Action::RequestQuit {
            if self.controller.should_guard_exit() {
                self.confirm.open(Prompt::Quit);
            } else {
                self.should_quit = true;
            }
            return;
        }

        if self.summary_visible() {
            match action {
                Action::CopyReport => self.copy_report(),
                Action::DownloadReport => self.download_report(),
                Action::RequestClose => self.confirm.open(Prompt::NewInquiry),
                _ => {
                    self.summary.handle_action(action);
                }
            }
            return;
        }

        match action {
            Action::SubmitForm => self.submit(),
            Action::RequestReset => self.confirm.open(Prompt::Reset),
            Action::PasteInput => match self.clipboard.get_text() {
                Ok(text) => self.edit_form(&Action::PasteBulk(text)),
                Err(e) => self.set_status(format!("Clipboard not available: {e}")),
            },
            _ => self.edit_form(action),
        }
    }

    /// Forward to the form and note whether anything was typed.
    fn edit_form(&mut self, action: &Action) {
        let before = self.form.values.clone();
        self.form.handle_action(action);
        if self.form.values != before {
            self.controller.on_input();
        }
    }

    fn answer_prompt(&mut self, action: &Action) {
        let Some(prompt) = self.confirm.prompt else {
            return;
        };
        self.confirm.handle_action(action);
        if *action != Action::ConfirmYes {
            return;
        }

        match prompt {
            Prompt::Reset => {
                self.form.clear();
                self.controller.on_reset();
                self.status_bar.handle_action(&Action::ClearStatus);
            }
            Prompt::NewInquiry => {
                self.controller.on_close();
                self.form.clear();
                self.summary.clear();
                self.status_bar.show_summary(false);
            }
            Prompt::Quit => self.should_quit = true,
        }
    }

    fn submit(&mut self) {
        let details = self.form.values.to_details();
        match self.controller.on_submit(details, Local::now()) {
            Ok(submission) => {
                self.summary.show(submission);
                self.status_bar.show_summary(true);
            }
            Err(InquiryError::Validation(errors)) => {
                self.form.show_errors(&errors);
                self.set_status(INVALID_FORM);
            }
            Err(e) => {
                error!(error = %e, "Submit failed");
                self.set_status(format!("Submit failed: {e}"));
            }
        }
    }

    fn copy_report(&mut self) {
        let message = match self.controller.on_copy(&mut self.clipboard) {
            Ok(()) => COPIED,
            Err(_) => COPY_FAILED,
        };
        self.set_status(message);
    }

    fn download_report(&mut self) {
        match self.controller.on_download() {
            Ok(path) => self.set_status(format!("Saved {}", path.display())),
            Err(e) => self.set_status(format!("Download failed: {e}")),
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_bar
            .handle_action(&Action::SetStatus(message.into()));
    }

    /// Render the full UI.
    fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        // Main content
        if self.summary_visible() {
            self.summary.render(frame, chunks[0]);
        } else {
            self.form.render(frame, chunks[0]);
        }

        // Status bar
        self.status_bar.render(frame, chunks[1]);

        // Overlays (rendered on top)
        self.confirm.render(frame, area);
        self.help.render(frame, area);
    }
}
