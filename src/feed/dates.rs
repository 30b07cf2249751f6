use chrono::{DateTime, NaiveDate, NaiveDateTime};

const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%a, %d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d %b %Y"];

/// Normalize a free-form feed date into `YYYY-MM-DD HH:MM:SS`.
///
/// Accepts RFC-2822 and RFC-3339 forms plus the common naive variants
/// feeds emit. The clock time is kept exactly as written; zone offsets
/// are discarded, not applied.
pub fn parse_feed_date(text: &str) -> Option<String> {
    let text = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.naive_local().format(OUTPUT_FORMAT).to_string());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.naive_local().format(OUTPUT_FORMAT).to_string());
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.format(OUTPUT_FORMAT).to_string());
        }
    }
    for format in NAIVE_DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(text, format) {
            let midnight = parsed.and_hms_opt(0, 0, 0)?;
            return Some(midnight.format(OUTPUT_FORMAT).to_string());
        }
    }

    None
}
