//! Yes/no confirmation overlay.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::action::{Action, Prompt};
use crate::components::{centered_rect, Component};
use crate::theme::Theme;

pub struct ConfirmDialogComponent {
    /// The open question, if any.
    pub prompt: Option<Prompt>,
}

impl ConfirmDialogComponent {
    pub fn new() -> Self {
        Self { prompt: None }
    }

    pub fn open(&mut self, prompt: Prompt) {
        self.prompt = Some(prompt);
    }

    pub fn is_open(&self) -> bool {
        self.prompt.is_some()
    }
}

impl Component for ConfirmDialogComponent {
    /// Closes on an answer. The caller reads `prompt` before dispatching so it
    /// knows what was answered.
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        if matches!(action, Action::ConfirmYes | Action::ConfirmNo) {
            self.prompt = None;
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(prompt) = self.prompt else {
            return;
        };

        let dialog = centered_rect(area, 52, 8);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Confirm ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::warning()));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        let message = Paragraph::new(prompt.message())
            .style(Theme::normal())
            .wrap(Wrap { trim: true });
        frame.render_widget(message, chunks[0]);

        let buttons = Line::from(vec![
            Span::styled("  y", Theme::key_hint()),
            Span::styled(" yes    ", Theme::dim()),
            Span::styled("n", Theme::key_hint()),
            Span::styled(" no", Theme::dim()),
        ]);
        frame.render_widget(Paragraph::new(buttons), chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_close_the_dialog() {
        let mut dialog = ConfirmDialogComponent::new();
        dialog.open(Prompt::Reset);
        dialog.handle_action(&Action::ScrollDown);
        assert_eq!(dialog.prompt, Some(Prompt::Reset));
        dialog.handle_action(&Action::ConfirmNo);
        assert!(!dialog.is_open());
    }
}
