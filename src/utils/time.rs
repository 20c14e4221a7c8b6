use chrono::{NaiveDateTime, Timelike};

/// This is the standard way of writing a timestamp in chaoscatcher. Local time, minute precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

// Older files and hand edits may carry seconds, fractions or a space separator.
const ACCEPTED_TIMESTAMP_FORMATS: [&str; 6] = [
    TIMESTAMP_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

pub fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses any of the accepted timestamp layouts. Returns `None` for anything else.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    ACCEPTED_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Drops seconds and anything smaller.
pub fn truncate_to_minute(value: NaiveDateTime) -> NaiveDateTime {
    value
        .with_second(0)
        .and_then(|v| v.with_nanosecond(0))
        .unwrap_or(value)
}
