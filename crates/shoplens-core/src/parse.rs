//! Parsing helpers for the loosely-formatted values the backend sends.
//!
//! Numeric fields arrive either as JSON numbers or as display strings with
//! embedded units and separators (`"16,240P"`, `"31회"`, `"48일"`). Date
//! fields arrive as bare dates or full timestamps. Everything here is total:
//! unparseable input yields a default or `None`, never an error.

use chrono::NaiveDate;

/// Parses an integer out of a string by stripping every non-digit byte.
///
/// `"16,240P"` → 16240, `"31회"` → 31, `"0일"` → 0, `"45000"` → 45000.
/// A string with no digits at all yields 0.
#[must_use]
pub fn parse_embedded_u64(s: &str) -> u64 {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Parses a date string in any of the formats the backend has been observed
/// to send: `YYYY-MM-DD`, `YYYY.MM.DD`, `YYYY/MM/DD`, or an ISO timestamp
/// whose date prefix is taken as-is.
///
/// Returns `None` if nothing matches.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in ["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    // Timestamps like "2025-01-15T09:30:00" or "2025-01-15 09:30:00":
    // the first ten characters carry the date.
    trimmed
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}
