//! Time-of-day helpers.
//!
//! Reservation sheets only carry wall-clock times for a single day, so every
//! value is a [`NaiveTime`]. Distances are computed by anchoring both values to
//! the same fixed date; the date itself carries no meaning.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{BookingError, Result};

/// 12-hour clock, hour without padding, uppercase AM/PM.
const DISPLAY_FORMAT: &str = "%-I:%M %p";
const PARSE_FORMAT: &str = "%I:%M %p";

/// Anchor a time-of-day to a fixed reference date so that subtraction yields
/// a duration.
pub fn to_instant(t: NaiveTime) -> NaiveDateTime {
    NaiveDate::MIN.and_time(t)
}

/// Absolute distance between two times of day.
pub fn distance(a: NaiveTime, b: NaiveTime) -> Duration {
    let delta = to_instant(a) - to_instant(b);
    if delta < Duration::zero() {
        -delta
    } else {
        delta
    }
}

/// Parse a 12-hour clock string such as `"2:05 PM"` or `"09:30 am"`.
///
/// Non-ASCII characters (non-breaking spaces from spreadsheet exports) are
/// dropped before parsing.
///
/// # Errors
/// Returns `BookingError::InvalidTime` when the text is not `H:MM AM/PM`.
pub fn parse_time(text: &str) -> Result<NaiveTime> {
    let invalid = || BookingError::InvalidTime {
        text: text.to_string(),
    };

    let cleaned: String = text.chars().filter(char::is_ascii).collect();
    let cleaned = cleaned.trim();
    if cleaned.len() < 2 {
        return Err(invalid());
    }
    // Re-space the marker so "3:45PM" and "3:45 PM" parse alike.
    let (clock, marker) = cleaned.split_at(cleaned.len() - 2);
    let clock = clock.trim_end();
    if !has_two_digit_minutes(clock) {
        return Err(invalid());
    }
    let normalized = format!("{} {}", clock, marker);
    NaiveTime::parse_from_str(&normalized, PARSE_FORMAT).map_err(|_| invalid())
}

/// chrono's `%M` also takes a single digit, so `"2:5"` needs rejecting here.
fn has_two_digit_minutes(clock: &str) -> bool {
    match clock.split_once(':') {
        Some((_, minutes)) => minutes.len() == 2 && minutes.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Render a time as `"2:05 PM"`.
pub fn format_time(t: NaiveTime) -> String {
    t.format(DISPLAY_FORMAT).to_string()
}

