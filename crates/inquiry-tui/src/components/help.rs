//! Help overlay: keybinding reference.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::action::Action;
use crate::components::{centered_rect, Component};
use crate::theme::Theme;

pub struct HelpComponent {
    pub visible: bool,
}

impl HelpComponent {
    pub fn new() -> Self {
        Self { visible: false }
    }
}

impl Component for HelpComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::ToggleHelp => {
                self.visible = !self.visible;
                None
            }
            Action::Tick => None,
            _ if self.visible => {
                // Any key closes help.
                self.visible = false;
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let dialog = centered_rect(area, 58, 24);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Help — Keybindings ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));

        let help_text = vec![
            Line::from(""),
            key_line("Ctrl+C", "Quit (press twice to drop edits)"),
            key_line("F1", "Toggle this help"),
            Line::from(""),
            Line::from(Span::styled("── Form ──", Theme::header())),
            Line::from(""),
            key_line("Tab / Shift+Tab", "Next / previous field"),
            key_line("Up / Down", "Move line, then field"),
            key_line("PageUp / PageDown", "Jump five fields"),
            key_line("Enter", "Newline / toggle / next field"),
            key_line("Left / Right / Space", "Choose urgency"),
            key_line("Ctrl+S / Ctrl+Enter", "Submit inquiry"),
            key_line("Ctrl+R", "Reset the form"),
            key_line("Ctrl+W / Ctrl+V", "Delete word / paste"),
            key_line("Esc / Ctrl+Q", "Quit"),
            Line::from(""),
            Line::from(Span::styled("── Summary ──", Theme::header())),
            Line::from(""),
            key_line("c", "Copy summary to clipboard"),
            key_line("d", "Download summary as .txt"),
            key_line("x", "Close and start a new inquiry"),
            key_line("Up / Down / j / k", "Scroll"),
        ];

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, dialog);
    }
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<22}", key), Theme::selected()),
        Span::styled(desc, Theme::normal()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_and_any_key_closes() {
        let mut help = HelpComponent::new();
        help.handle_action(&Action::ToggleHelp);
        assert!(help.visible);
        help.handle_action(&Action::Tick);
        assert!(help.visible);
        help.handle_action(&Action::CharInput('a'));
        assert!(!help.visible);
    }
}
