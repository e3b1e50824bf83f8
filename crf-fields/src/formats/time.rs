//! Time-of-day parsing for `HH:mm` and `HH:mm:ss` values.

use chrono::{NaiveTime, Timelike};

/// Parses `HH:mm` or `HH:mm:ss` into seconds since midnight.
///
/// Every component must be exactly two ASCII digits and name a real time
/// of day.
#[must_use]
pub fn parse_time_of_day(input: &str) -> Option<u32> {
    let mut parts = input.split(':');
    let hour = two_digits(parts.next()?)?;
    let minute = two_digits(parts.next()?)?;
    let second = match parts.next() {
        Some(part) => two_digits(part)?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveTime::from_hms_opt(hour, minute, second).map(|t| t.num_seconds_from_midnight())
}

/// Returns true if the value is a valid `HH:mm` or `HH:mm:ss` time.
#[must_use]
pub fn is_time_of_day(input: &str) -> bool {
    parse_time_of_day(input).is_some()
}

fn two_digits(part: &str) -> Option<u32> {
    if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
