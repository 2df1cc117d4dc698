//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a frontmatter timestamp
///
/// Accepts RFC 3339 (`2023-04-01T10:00:00Z`, `2023-04-01T10:00:00+02:00`)
/// and the bare forms YAML authors tend to write (`2023-04-01`,
/// `2023-04-01 10:00`, `2023-04-01T10:00:00.5`). Values without an offset
/// are taken as UTC.
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // YAML allows a space instead of `T` and a `Z` suffix on the space form
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    let naive_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    let trimmed = s.trim_end_matches('Z');
    for fmt in naive_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Whole seconds since the epoch; a missing date counts as the epoch
pub fn epoch_seconds(date: Option<&DateTime<Utc>>) -> i64 {
    date.map(|d| d.timestamp()).unwrap_or(0)
}

/// Format a date for an RSS `<pubDate>`
pub fn date_rfc2822(date: &DateTime<Utc>) -> String {
    date.to_rfc2822()
}
