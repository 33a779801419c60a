//! Text formatting helpers shared by the report views and exporters.
//!
//! All timestamps rendered to the user follow the same two fixed
//! patterns, and all shortened text uses the same ellipsis convention,
//! so the terminal tables, the PDF, and the CSV/JSON exports stay
//! consistent with each other.

use chrono::{NaiveDate, NaiveDateTime};

/// Timestamp pattern used everywhere a full date-time is shown.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date-only pattern used for day buckets and date ranges.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats a timestamp with the application-wide pattern.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Formats a date with the application-wide pattern.
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Truncates text to at most `max` characters, appending `...` when
/// anything was cut. Operates on characters, not bytes, so multi-byte
/// input never splits a code point.
pub fn truncate_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Returns the date-only portion of a formatted timestamp string.
pub fn date_only(timestamp: &str) -> &str {
    timestamp.split(' ').next().unwrap_or(timestamp)
}
