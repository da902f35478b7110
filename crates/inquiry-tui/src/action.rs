//! Action enum: the central message bus for the TUI.
//! All user interactions flow through here.

/// Every possible action that can occur in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ── Global ──────────────────────────────────────────────
    /// Ctrl+C: quit, asking once if the form has unsaved input.
    Quit,
    /// Quit, asking first if the form has unsaved input.
    RequestQuit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Display a status message in the status bar.
    SetStatus(String),
    /// Clear the status message.
    ClearStatus,
    /// A tick event for redraws and timed status resets.
    Tick,

    // ── Form ────────────────────────────────────────────────
    /// A character was typed (only sent when in input mode).
    CharInput(char),
    /// Backspace pressed (only sent when in input mode).
    BackspaceInput,
    /// Delete word (Ctrl+W).
    DeleteWord,
    /// Enter: newline in multi-line fields, toggle on checkboxes, next field otherwise.
    NewlineInput,
    /// Move focus to the next field (Tab).
    NextField,
    /// Move focus to the previous field (Shift+Tab).
    PrevField,
    /// Cursor left, or previous option on a choice field.
    CursorLeft,
    /// Cursor right, or next option on a choice field.
    CursorRight,
    /// Paste from the system clipboard (Ctrl+V).
    PasteInput,
    /// Bulk paste from bracketed paste mode (terminal sends entire text at once).
    PasteBulk(String),
    /// Submit the form (Ctrl+S / Ctrl+Enter).
    SubmitForm,
    /// Clear the form, after confirmation (Ctrl+R).
    RequestReset,

    // ── Summary ─────────────────────────────────────────────
    /// Copy the report to the clipboard.
    CopyReport,
    /// Save the report as a text file.
    DownloadReport,
    /// Close the summary and start another inquiry, after confirmation.
    RequestClose,

    // ── Confirm dialog ──────────────────────────────────────
    /// Answer yes to the open prompt (y / Enter).
    ConfirmYes,
    /// Answer no to the open prompt (n / Esc).
    ConfirmNo,

    // ── Scrolling ───────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
}

/// Whether the app is in a text-input mode where raw keys should
/// be forwarded to the form instead of interpreted as shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode: keys are shortcuts.
    Normal,
    /// Text input mode: keys go to the focused form field.
    Editing,
}

/// The question an open confirm dialog is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Clear all form input.
    Reset,
    /// Leave the summary for a new inquiry.
    NewInquiry,
    /// Quit with unsaved input.
    Quit,
}

impl Prompt {
    pub fn message(&self) -> &'static str {
        match self {
            Prompt::Reset => "Are you sure you want to reset the form? All entered data will be lost.",
            Prompt::NewInquiry => "Would you like to submit another inquiry?",
            Prompt::Quit => "You have unsaved changes. Quit anyway?",
        }
    }
}
