//! Conversions between backend timestamps and `datetime-local` inputs.
//!
//! The backend stores local times as `YYYY-MM-DD HH:MM:SS`; browsers edit them
//! as `YYYY-MM-DDTHH:MM`. RFC 3339 values (e.g. `publish_date` on news) are
//! accepted on read and normalized to the stored format on write.

#[cfg(test)]
#[path = "datetime_test.rs"]
mod datetime_test;

use chrono::{DateTime, NaiveDateTime};

pub const STORED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DISPLAY_FORMAT: &str = "%b %d, %Y %H:%M";

const ACCEPTED_FORMATS: [&str; 4] = [STORED_FORMAT, "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", INPUT_FORMAT];

/// Parse any accepted timestamp form.
pub fn parse(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.naive_utc()))
}

/// Value for a `datetime-local` input; empty when unparseable.
pub fn to_input_value(stored: &str) -> String {
    parse(stored).map(|dt| dt.format(INPUT_FORMAT).to_string()).unwrap_or_default()
}

/// Stored form of a `datetime-local` input value.
pub fn from_input_value(input: &str) -> Option<String> {
    parse(input).map(|dt| dt.format(STORED_FORMAT).to_string())
}

/// Table cell text; unparseable values are shown as-is.
pub fn display(text: &str) -> String {
    parse(text).map_or_else(|| text.to_owned(), |dt| dt.format(DISPLAY_FORMAT).to_string())
}
