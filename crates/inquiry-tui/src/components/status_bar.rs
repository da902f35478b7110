//! Status bar at the bottom of the TUI.

use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

/// How long a status message stays before the bar falls back to its hint.
const STATUS_TTL: Duration = Duration::from_secs(2);

const FORM_HINT: &str = "Fill in the inquiry and press Ctrl+S to submit.";
const SUMMARY_HINT: &str = "Inquiry submitted. Copy or download the summary.";

pub struct StatusBarComponent {
    /// Current status message.
    pub message: String,
    /// Whether the summary (rather than the form) is on screen.
    pub summary: bool,
    /// When the current message was set; `None` for the resting hint.
    set_at: Option<Instant>,
}

impl StatusBarComponent {
    pub fn new() -> Self {
        Self {
            message: FORM_HINT.to_string(),
            summary: false,
            set_at: None,
        }
    }

    /// Switch between form and summary, resetting the message to that view's hint.
    pub fn show_summary(&mut self, summary: bool) {
        self.summary = summary;
        self.rest();
    }

    fn rest(&mut self) {
        self.message = if self.summary { SUMMARY_HINT } else { FORM_HINT }.to_string();
        self.set_at = None;
    }

    /// Short view name for the pill badge.
    fn badge(&self) -> &'static str {
        if self.summary {
            "Summary"
        } else {
            "Form"
        }
    }
}

impl Component for StatusBarComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::SetStatus(msg) => {
                self.message = msg.clone();
                self.set_at = Some(Instant::now());
            }
            Action::ClearStatus => self.rest(),
            Action::Tick => {
                if self.set_at.is_some_and(|at| at.elapsed() >= STATUS_TTL) {
                    self.rest();
                }
            }
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = area.width as usize;

        // Right side: compact key hints
        let hints = if self.summary { "c·d·x·q·?" } else { "^S·^R·Esc·F1" };
        let hints_len = hints.chars().count() + 1; // +1 for trailing space

        let badge = self.badge();
        let badge_len = badge.len() + 2; // spaces around badge

        // Truncate message to remaining space
        let msg_budget = width
            .saturating_sub(badge_len)
            .saturating_sub(hints_len)
            .saturating_sub(4); // separators and spacing

        let msg_chars = self.message.chars().count();
        let msg = if msg_chars > msg_budget {
            if msg_budget > 3 {
                let kept: String = self.message.chars().take(msg_budget - 3).collect();
                format!("{kept}...")
            } else {
                String::new()
            }
        } else {
            self.message.clone()
        };

        // Pad to push hints to the right edge
        let used = badge_len + 2 + msg.chars().count();
        let pad = width.saturating_sub(used + hints_len);

        let msg_style = if self.set_at.is_some() {
            Theme::normal()
        } else {
            Theme::dim()
        };

        let line = Line::from(vec![
            Span::styled(format!(" {badge} "), Theme::muted()),
            Span::styled("  ", Theme::dim()),
            Span::styled(msg, msg_style),
            Span::raw(" ".repeat(pad)),
            Span::styled(hints, Theme::key_hint()),
            Span::raw(" "),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_and_reset() {
        let mut bar = StatusBarComponent::new();
        bar.handle_action(&Action::SetStatus("✓ Copied!".to_string()));
        assert_eq!(bar.message, "✓ Copied!");

        // Fresh messages survive a tick.
        bar.handle_action(&Action::Tick);
        assert_eq!(bar.message, "✓ Copied!");

        bar.handle_action(&Action::ClearStatus);
        assert_eq!(bar.message, FORM_HINT);
    }

    #[test]
    fn summary_switches_hint() {
        let mut bar = StatusBarComponent::new();
        bar.show_summary(true);
        assert_eq!(bar.badge(), "Summary");
        assert_eq!(bar.message, SUMMARY_HINT);
        bar.show_summary(false);
        assert_eq!(bar.badge(), "Form");
    }
}
