use chrono::{DateTime, Local, NaiveDate};

/// Rendered in place of a date that could not be parsed, so the defect is
/// visible in the report instead of aborting it.
pub const INVALID_DATE: &str = "Invalid Date";

/// Parse a `YYYY-MM-DD` date. A full RFC 3339 timestamp is accepted too.
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(input).ok().map(|dt| dt.date_naive()))
}

/// `2025-06-01` → `June 1, 2025`.
pub fn format_long_date(input: &str) -> String {
    match parse_iso_date(input) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Submission timestamp in the en-US style, e.g. `6/1/2025, 3:04:05 PM`.
pub fn format_submission_date(at: DateTime<Local>) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
