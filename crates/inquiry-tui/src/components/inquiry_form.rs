//! Inquiry form: every field of a sales inquiry in one scrolling column.
//!
//! Features:
//! - Single-line, multi-line, date, choice and checkbox fields
//! - Tab / Shift+Tab, or Up/Down past a field's edge, move between fields
//! - Enter inserts newlines in multi-line fields, toggles checkboxes,
//!   and moves on from single-line fields
//! - A field is checked when focus leaves it: red border when invalid,
//!   green when valid; the red clears again on the next edit
//! - Ctrl+S submits, Ctrl+R resets (handled by the App)

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use inquiry_core::form::{FieldId, FieldKind, FormValues};
use inquiry_core::priority::Urgency;
use inquiry_core::validate::{validate_field, ValidationErrors};

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

/// Height of a multi-line field including its border.
const MULTILINE_HEIGHT: u16 = 6;
/// Height of every other field including its border.
const SINGLE_HEIGHT: u16 = 3;
/// Fields skipped by PageUp / PageDown.
const PAGE_FIELDS: usize = 5;

/// Result of checking a field when focus left it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Valid,
    Invalid(String),
}

pub struct InquiryFormComponent {
    /// Everything typed so far.
    pub values: FormValues,
    /// Index into `FieldId::all()` of the focused field.
    focused: usize,
    /// Cursor position (byte offset) within the focused field's text.
    pub cursor: usize,
    /// Per-field validation feedback shown as border colour.
    feedback: BTreeMap<FieldId, Feedback>,
    /// Earliest acceptable expected date.
    today: NaiveDate,
}

impl InquiryFormComponent {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            values: FormValues::new(),
            focused: 0,
            cursor: 0,
            feedback: BTreeMap::new(),
            today,
        }
    }

    pub fn focused_field(&self) -> FieldId {
        FieldId::all()[self.focused]
    }

    pub fn feedback(&self, field: FieldId) -> Option<&Feedback> {
        self.feedback.get(&field)
    }

    /// Clear every field and return focus to the top.
    pub fn clear(&mut self) {
        self.values.clear();
        self.feedback.clear();
        self.focused = 0;
        self.cursor = 0;
    }

    /// Mark every field named in `errors` and focus the first of them.
    pub fn show_errors(&mut self, errors: &ValidationErrors) {
        for error in &errors.0 {
            self.feedback
                .insert(error.field, Feedback::Invalid(error.to_string()));
        }
        if let Some(first) = errors.first() {
            if let Some(index) = FieldId::all().iter().position(|f| *f == first.field) {
                self.focused = index;
                self.cursor = self.values.text(first.field).len();
            }
        }
    }

    /// Check a field the way the form does when focus leaves it.
    fn check_field(&mut self, field: FieldId) {
        let details = self.values.to_details();
        let blank = self.values.text(field).trim().is_empty();
        match validate_field(field, &details, self.today) {
            Some(error) => {
                self.feedback
                    .insert(field, Feedback::Invalid(error.to_string()));
            }
            None if field.kind() == FieldKind::Checkbox || (blank && !field.is_required()) => {
                self.feedback.remove(&field);
            }
            None => {
                self.feedback.insert(field, Feedback::Valid);
            }
        }
    }

    /// Move focus to `index`, checking the field being left.
    fn focus(&mut self, index: usize) {
        let index = index.min(FieldId::all().len() - 1);
        if index == self.focused {
            return;
        }
        self.check_field(self.focused_field());
        self.focused = index;
        self.cursor = self.values.text(self.focused_field()).len();
    }

    fn focus_next(&mut self) {
        self.focus(self.focused + 1);
    }

    fn focus_prev(&mut self) {
        self.focus(self.focused.saturating_sub(1));
    }

    /// Whether the focused field takes typed text.
    fn is_text_field(&self) -> bool {
        matches!(
            self.focused_field().kind(),
            FieldKind::Text | FieldKind::MultiLine | FieldKind::Date
        )
    }

    /// An edit clears the red border until the field is checked again.
    fn edited(&mut self) {
        let field = self.focused_field();
        if matches!(self.feedback.get(&field), Some(Feedback::Invalid(_))) {
            self.feedback.remove(&field);
        }
    }

    /// Clamp cursor to valid range for the focused field.
    fn clamp_cursor(&mut self) {
        let len = self.values.text(self.focused_field()).len();
        if self.cursor > len {
            self.cursor = len;
        }
    }

    /// Insert a string at the cursor position.
    fn insert_str(&mut self, s: &str) {
        self.clamp_cursor();
        let cursor = self.cursor;
        let field = self.focused_field();
        self.values.text_mut(field).insert_str(cursor, s);
        self.cursor += s.len();
        self.edited();
    }

    /// Delete the character before the cursor.
    fn delete_char(&mut self) {
        self.clamp_cursor();
        if self.cursor > 0 {
            let cursor = self.cursor;
            let field = self.focused_field();
            let input = self.values.text_mut(field);
            let prev = input[..cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev);
            self.cursor = prev;
            self.edited();
        }
    }

    /// Delete the word before the cursor (Ctrl+W).
    fn delete_word(&mut self) {
        self.clamp_cursor();
        if self.cursor > 0 {
            let cursor = self.cursor;
            let field = self.focused_field();
            let input = self.values.text_mut(field);
            let mut end = cursor;
            while end > 0 && matches!(input.as_bytes().get(end - 1), Some(b' ' | b'\n')) {
                end -= 1;
            }
            let mut start = end;
            while start > 0 && !matches!(input.as_bytes().get(start - 1), Some(b' ' | b'\n')) {
                start -= 1;
            }
            input.drain(start..cursor);
            self.cursor = start;
            self.edited();
        }
    }

    fn cursor_left(&mut self) {
        self.clamp_cursor();
        let text = self.values.text(self.focused_field());
        self.cursor = text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
    }

    fn cursor_right(&mut self) {
        self.clamp_cursor();
        let text = self.values.text(self.focused_field());
        if let Some(c) = text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Move the cursor up one line in a multi-line field. Returns false on the first line.
    fn cursor_up(&mut self) -> bool {
        let text = self.values.text(self.focused_field());
        let (line, col) = cursor_line_col(text, self.cursor);
        if line == 0 {
            return false;
        }
        let lines: Vec<&str> = text.split('\n').collect();
        let prev_line_start: usize = lines[..line - 1].iter().map(|l| l.len() + 1).sum();
        self.cursor = prev_line_start + floor_char_boundary(lines[line - 1], col);
        true
    }

    /// Move the cursor down one line in a multi-line field. Returns false on the last line.
    fn cursor_down(&mut self) -> bool {
        let text = self.values.text(self.focused_field());
        let lines: Vec<&str> = text.split('\n').collect();
        let (line, col) = cursor_line_col(text, self.cursor);
        if line + 1 >= lines.len() {
            return false;
        }
        let next_line_start: usize = lines[..line + 1].iter().map(|l| l.len() + 1).sum();
        self.cursor = next_line_start + floor_char_boundary(lines[line + 1], col);
        true
    }

    /// Step the urgency choice forwards or backwards.
    fn cycle_urgency(&mut self, forward: bool) {
        let field = self.focused_field();
        let next = match self.values.text(field).parse::<Urgency>() {
            Ok(level) if forward => level.next(),
            Ok(level) => level.prev(),
            Err(_) if forward => Urgency::Low,
            Err(_) => Urgency::Critical,
        };
        self.values.set_text(field, next.as_str());
        self.edited();
    }

    fn toggle_checkbox(&mut self) {
        self.values.toggle(self.focused_field());
    }
}

impl Component for InquiryFormComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        let kind = self.focused_field().kind();
        match action {
            // ── Text input ──────────────────────────────────────
            Action::CharInput(c) => match kind {
                FieldKind::Checkbox if *c == ' ' => self.toggle_checkbox(),
                FieldKind::Choice if *c == ' ' => self.cycle_urgency(true),
                FieldKind::Checkbox | FieldKind::Choice => {}
                _ => self.insert_str(c.encode_utf8(&mut [0; 4])),
            },
            Action::BackspaceInput if self.is_text_field() => self.delete_char(),
            Action::DeleteWord if self.is_text_field() => self.delete_word(),
            Action::PasteBulk(text) if self.is_text_field() && !text.is_empty() => {
                if kind == FieldKind::MultiLine {
                    self.insert_str(&text.replace("\r\n", "\n"));
                } else {
                    // Single-line fields: only first line, no newlines.
                    self.insert_str(text.lines().next().unwrap_or(""));
                }
            }

            // ── Enter ───────────────────────────────────────────
            Action::NewlineInput => match kind {
                FieldKind::MultiLine => self.insert_str("\n"),
                FieldKind::Checkbox => self.toggle_checkbox(),
                _ => self.focus_next(),
            },

            // ── Focus ───────────────────────────────────────────
            Action::NextField => self.focus_next(),
            Action::PrevField => self.focus_prev(),
            Action::PageDown => self.focus(self.focused + PAGE_FIELDS),
            Action::PageUp => self.focus(self.focused.saturating_sub(PAGE_FIELDS)),
            Action::ScrollDown => {
                if kind != FieldKind::MultiLine || !self.cursor_down() {
                    self.focus_next();
                }
            }
            Action::ScrollUp => {
                if kind != FieldKind::MultiLine || !self.cursor_up() {
                    self.focus_prev();
                }
            }

            // ── Left / Right ────────────────────────────────────
            Action::CursorLeft => match kind {
                FieldKind::Choice => self.cycle_urgency(false),
                FieldKind::Checkbox => {}
                _ => self.cursor_left(),
            },
            Action::CursorRight => match kind {
                FieldKind::Choice => self.cycle_urgency(true),
                FieldKind::Checkbox => {}
                _ => self.cursor_right(),
            },
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Heading
            Constraint::Min(3),    // Fields
            Constraint::Length(1), // Instructions
        ])
        .split(area);

        let required = FieldId::all().iter().filter(|f| f.is_required()).count();
        let heading = Line::from(vec![
            Span::styled(" ASA Sales Inquiry", Theme::title()),
            Span::styled(
                format!(
                    "  field {}/{}  ·  * {} required",
                    self.focused + 1,
                    FieldId::all().len(),
                    required
                ),
                Theme::dim(),
            ),
        ]);
        frame.render_widget(Paragraph::new(heading), chunks[0]);

        // ── Fields ──────────────────────────────────────────────
        let fields_area = chunks[1];
        let heights: Vec<u16> = FieldId::all().iter().map(|f| field_height(*f)).collect();
        let start = first_visible(&heights, self.focused, fields_area.height);

        let mut y = fields_area.y;
        for (index, field) in FieldId::all().iter().enumerate().skip(start) {
            let height = heights[index];
            if y + height > fields_area.bottom() {
                break;
            }
            let rect = Rect::new(fields_area.x, y, fields_area.width, height);
            self.render_field(index, *field, frame, rect);
            y += height;
        }

        // ── Instructions ────────────────────────────────────────
        let field_hint: Vec<Span> = match self.focused_field().kind() {
            FieldKind::MultiLine => vec![
                Span::styled("enter", Theme::key_hint()),
                Span::styled(" newline  ", Theme::dim()),
            ],
            FieldKind::Checkbox => vec![
                Span::styled("space", Theme::key_hint()),
                Span::styled(" toggle  ", Theme::dim()),
            ],
            FieldKind::Choice => vec![
                Span::styled("←→", Theme::key_hint()),
                Span::styled(" choose  ", Theme::dim()),
            ],
            FieldKind::Text | FieldKind::Date => vec![
                Span::styled("enter", Theme::key_hint()),
                Span::styled(" next field  ", Theme::dim()),
            ],
        };
        let mut spans = vec![Span::raw("  ")];
        spans.extend(field_hint);
        spans.extend([
            Span::styled("tab", Theme::key_hint()),
            Span::styled(" next  ", Theme::dim()),
            Span::styled("ctrl+s", Theme::key_hint()),
            Span::styled(" submit  ", Theme::dim()),
            Span::styled("ctrl+r", Theme::key_hint()),
            Span::styled(" reset  ", Theme::dim()),
            Span::styled("F1", Theme::key_hint()),
            Span::styled(" help", Theme::dim()),
        ]);
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[2]);
    }
}

impl InquiryFormComponent {
    /// Render one field as a bordered box.
    fn render_field(&self, index: usize, field: FieldId, frame: &mut Frame, area: Rect) {
        let is_focused = index == self.focused;
        let feedback = self.feedback.get(&field);

        let border_style = match feedback {
            Some(Feedback::Invalid(_)) => Theme::invalid_border(),
            _ if is_focused => Style::default().fg(Theme::accent()),
            Some(Feedback::Valid) => Theme::valid_border(),
            None => Theme::border(),
        };

        let group_start = index == 0 || FieldId::all()[index - 1].group() != field.group();
        let star = if field.is_required() { " *" } else { "" };
        let title = if group_start {
            format!(" {} › {}{} ", field.group(), field.label(), star)
        } else {
            format!(" {}{} ", field.label(), star)
        };

        let mut block = Block::default()
            .title(title)
            .title_style(if is_focused {
                Theme::key_hint()
            } else {
                Theme::muted()
            })
            .borders(Borders::ALL)
            .border_style(border_style);
        if let Some(Feedback::Invalid(message)) = feedback {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" {message} "),
                Style::default().fg(Theme::error()),
            )));
        }

        let inner = block.inner(area);
        let text = self.values.text(field);

        let content = match field.kind() {
            FieldKind::Checkbox => {
                let checked = self.values.is_checked(field);
                let mark = if checked { "[x]" } else { "[ ]" };
                let style = if is_focused {
                    Theme::selected()
                } else {
                    Theme::normal()
                };
                Paragraph::new(Line::from(vec![
                    Span::styled(mark, style),
                    Span::styled(if checked { " Yes" } else { " No" }, Theme::muted()),
                ]))
            }
            FieldKind::Choice => {
                let mut spans = Vec::new();
                for level in Urgency::all() {
                    let style = if text == level.as_str() {
                        Theme::selected()
                    } else {
                        Theme::dim()
                    };
                    let marker = if text == level.as_str() { "●" } else { "○" };
                    spans.push(Span::styled(format!("{marker} {level}  "), style));
                }
                Paragraph::new(Line::from(spans))
            }
            FieldKind::MultiLine if is_focused => {
                let (lines, row, col) = visual_lines(text, self.cursor, inner.width as usize);
                let viewport = inner.height as usize;
                let scroll = if viewport > 0 && row >= viewport {
                    row + 1 - viewport
                } else {
                    0
                };
                let rendered: Vec<Line> = lines
                    .iter()
                    .enumerate()
                    .skip(scroll)
                    .take(viewport)
                    .map(|(i, l)| {
                        if i == row {
                            cursor_line(l, col)
                        } else {
                            Line::from(Span::styled(l.clone(), Theme::normal()))
                        }
                    })
                    .collect();
                Paragraph::new(rendered)
            }
            FieldKind::MultiLine => Paragraph::new(text.to_string())
                .style(Theme::normal())
                .wrap(Wrap { trim: false }),
            FieldKind::Text | FieldKind::Date => {
                if text.is_empty() && !is_focused {
                    let placeholder = if field.kind() == FieldKind::Date {
                        format!("YYYY-MM-DD (today or later, e.g. {})", self.today)
                    } else {
                        String::new()
                    };
                    Paragraph::new(Span::styled(placeholder, Theme::dim()))
                } else if is_focused {
                    let pos = self.cursor.min(text.len());
                    let col = text[..pos].chars().count();
                    let width = (inner.width as usize).max(1);
                    // Scroll horizontally so the cursor stays in view.
                    let skip = (col + 1).saturating_sub(width);
                    let shown: String = text.chars().skip(skip).collect();
                    Paragraph::new(cursor_line(&shown, col - skip))
                } else {
                    Paragraph::new(Span::styled(text.to_string(), Theme::normal()))
                }
            }
        };

        frame.render_widget(content.block(block), area);
    }
}

fn field_height(field: FieldId) -> u16 {
    if field.kind() == FieldKind::MultiLine {
        MULTILINE_HEIGHT
    } else {
        SINGLE_HEIGHT
    }
}

/// Index of the first field to draw so that `focused` is on screen, showing
/// as many fields above it as fit.
fn first_visible(heights: &[u16], focused: usize, available: u16) -> usize {
    let mut start = focused;
    let mut used = heights.get(focused).copied().unwrap_or(0);
    while start > 0 && used + heights[start - 1] <= available {
        start -= 1;
        used += heights[start];
    }
    start
}

/// Line number and byte column of `cursor` within `text`.
fn cursor_line_col(text: &str, cursor: usize) -> (usize, usize) {
    let cursor = cursor.min(text.len());
    let before = &text[..cursor];
    let line = before.matches('\n').count();
    let col = before.rfind('\n').map(|p| cursor - p - 1).unwrap_or(cursor);
    (line, col)
}

/// Largest char boundary in `line` not past `col`.
fn floor_char_boundary(line: &str, col: usize) -> usize {
    let mut col = col.min(line.len());
    while !line.is_char_boundary(col) {
        col -= 1;
    }
    col
}

/// Hard-wrap `text` into rows of `width` characters and locate the cursor.
/// Returns the rows plus the cursor's row and column (in characters).
fn visual_lines(text: &str, cursor: usize, width: usize) -> (Vec<String>, usize, usize) {
    let width = width.max(1);
    let (cursor_line, cursor_byte_col) = cursor_line_col(text, cursor);

    let mut rows = Vec::new();
    let mut cursor_row = 0;
    let mut cursor_col = 0;

    for (li, logical) in text.split('\n').enumerate() {
        let chars: Vec<char> = logical.chars().collect();
        let col = if li == cursor_line {
            Some(logical[..cursor_byte_col.min(logical.len())].chars().count())
        } else {
            None
        };

        if chars.is_empty() {
            if col.is_some() {
                cursor_row = rows.len();
                cursor_col = 0;
            }
            rows.push(String::new());
            continue;
        }

        let last_segment = (chars.len() - 1) / width;
        for (si, segment) in chars.chunks(width).enumerate() {
            if let Some(c) = col {
                let start = si * width;
                if c >= start && (c < start + width || si == last_segment) {
                    cursor_row = rows.len();
                    cursor_col = c - start;
                }
            }
            rows.push(segment.iter().collect());
        }
    }

    (rows, cursor_row, cursor_col)
}

/// A line with the character at `col` drawn as a block cursor.
fn cursor_line(text: &str, col: usize) -> Line<'static> {
    let before: String = text.chars().take(col).collect();
    let at: String = text.chars().nth(col).map(String::from).unwrap_or_else(|| " ".to_string());
    let rest: String = text.chars().skip(col + 1).collect();
    Line::from(vec![
        Span::styled(before, Theme::normal()),
        Span::styled(at, Theme::cursor()),
        Span::styled(rest, Theme::normal()),
    ])
}
