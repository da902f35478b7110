//! Greedy word wrap for the report's free-text blocks.

/// Wrap `text` so that no line is wider than `width` characters.
///
/// Words are split on any whitespace, so embedded line breaks are collapsed.
/// A word longer than `width` is never split; it gets a line of its own.
pub fn wrap(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

/// [`wrap`] for optional fields; absent text wraps to an empty string.
pub fn wrap_opt(text: Option<&str>, width: usize) -> String {
    text.map(|t| wrap(t, width)).unwrap_or_default()
}
