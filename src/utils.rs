//! Utility functions for string manipulation and date display.
//!
//! This module provides helper functions used throughout the application:
//! - String truncation for logging
//! - Publication date formatting for article cards
//! - Capitalization for category labels

use chrono::DateTime;

/// Truncate a string for logging purposes.
///
/// Long strings are cut at the last character boundary at or before `max`
/// bytes, with an ellipsis and the number of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Format an RFC 3339 publication timestamp as e.g. `May 6, 2025`.
///
/// Missing timestamps render as `Unknown date`; unparseable ones are
/// shown verbatim.
pub fn format_published_date(published_at: Option<&str>) -> String {
    match published_at {
        None => "Unknown date".to_string(),
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => dt.format("%B %-d, %Y").to_string(),
            Err(_) => raw.to_string(),
        },
    }
}

/// Capitalize the first character of a string.
///
/// Used for category labels (e.g., "science" -> "Science").
pub fn upcase(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}
