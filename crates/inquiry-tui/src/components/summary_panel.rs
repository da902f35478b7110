//! Summary panel: shown after a successful submit.
//!
//! Displays the success banner with the inquiry ID and the formatted
//! technical summary exactly as it will be copied or downloaded.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use inquiry_core::Submission;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

/// Lines moved by PageUp / PageDown.
const PAGE_LINES: usize = 10;

pub struct SummaryPanelComponent {
    inquiry_id: String,
    lines: Vec<String>,
    /// Index of the first visible report line.
    scroll: usize,
}

impl SummaryPanelComponent {
    pub fn new() -> Self {
        Self {
            inquiry_id: String::new(),
            lines: Vec::new(),
            scroll: 0,
        }
    }

    /// Show a fresh submission, scrolled to the top.
    pub fn show(&mut self, submission: &Submission) {
        self.inquiry_id = submission.inquiry_id().to_string();
        self.lines = submission.report.lines().map(str::to_string).collect();
        self.scroll = 0;
    }

    pub fn clear(&mut self) {
        self.inquiry_id.clear();
        self.lines.clear();
        self.scroll = 0;
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }
}

impl Component for SummaryPanelComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::ScrollDown => self.scroll = (self.scroll + 1).min(self.max_scroll()),
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::PageDown => self.scroll = (self.scroll + PAGE_LINES).min(self.max_scroll()),
            Action::PageUp => self.scroll = self.scroll.saturating_sub(PAGE_LINES),
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Banner
            Constraint::Min(3),    // Report
            Constraint::Length(1), // Instructions
        ])
        .split(area);

        // ── Banner ──────────────────────────────────────────────
        let banner = Paragraph::new(vec![
            Line::from(Span::styled(
                " ✓ Inquiry submitted successfully!",
                Theme::success_banner(),
            )),
            Line::from(vec![
                Span::styled(" Inquiry ID: ", Theme::muted()),
                Span::styled(self.inquiry_id.as_str(), Theme::header()),
            ]),
        ]);
        frame.render_widget(banner, chunks[0]);

        // ── Report ──────────────────────────────────────────────
        let report_area = chunks[1];
        let viewport = report_area.height.saturating_sub(2) as usize;
        let total = self.lines.len();
        let scroll = self.scroll.min(total.saturating_sub(viewport));

        let visible: Vec<Line> = self
            .lines
            .iter()
            .skip(scroll)
            .take(viewport)
            .map(|l| Line::from(Span::styled(l.as_str(), Theme::normal())))
            .collect();

        let has_more_above = scroll > 0;
        let has_more_below = scroll + viewport < total;
        let scroll_hint = if has_more_below {
            format!(" [{} more below] ", total - scroll - viewport)
        } else if has_more_above {
            format!(" [{scroll} above] ")
        } else {
            String::new()
        };

        let mut block = Block::default()
            .title(" Technical Summary ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::success()));
        if !scroll_hint.is_empty() {
            block = block.title_bottom(Line::from(Span::styled(scroll_hint, Theme::dim())));
        }
        frame.render_widget(Paragraph::new(visible).block(block), report_area);

        // ── Instructions ────────────────────────────────────────
        let instructions = Line::from(vec![
            Span::styled("  c", Theme::key_hint()),
            Span::styled(" copy  ", Theme::dim()),
            Span::styled("d", Theme::key_hint()),
            Span::styled(" download  ", Theme::dim()),
            Span::styled("x", Theme::key_hint()),
            Span::styled(" new inquiry  ", Theme::dim()),
            Span::styled("↑↓", Theme::key_hint()),
            Span::styled(" scroll  ", Theme::dim()),
            Span::styled("q", Theme::key_hint()),
            Span::styled(" quit", Theme::dim()),
        ]);
        frame.render_widget(Paragraph::new(instructions), chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inquiry_core::record::{InquiryDetails, InquiryRecord};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn submission() -> Submission {
        let record = InquiryRecord::new(
            "ASA-1-001".to_string(),
            "6/1/2025, 3:04:05 PM".to_string(),
            InquiryDetails::default(),
        );
        Submission {
            report: "one\ntwo\nthree".to_string(),
            record,
        }
    }

    #[test]
    fn scroll_stays_within_report() {
        let mut panel = SummaryPanelComponent::new();
        panel.show(&submission());
        panel.handle_action(&Action::ScrollUp);
        assert_eq!(panel.scroll, 0);
        panel.handle_action(&Action::PageDown);
        assert_eq!(panel.scroll, 2);
        panel.show(&submission());
        assert_eq!(panel.scroll, 0);
    }

    #[test]
    fn renders_banner_with_id() {
        let mut panel = SummaryPanelComponent::new();
        panel.show(&submission());
        let mut terminal = Terminal::new(TestBackend::new(70, 12)).unwrap();
        terminal.draw(|frame| panel.render(frame, frame.area())).unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Inquiry ID: ASA-1-001"));
        assert!(screen.contains("three"));
    }
}
