//! 12-hour time-of-day parsing.
//!
//! Department shift boundaries are configured as strings such as `"9:00 AM"`
//! or `"6:30 pm"`. This module turns them into [`NaiveTime`] values and
//! anchors them onto a calendar day.
//!
//! ## Accepted Format
//!
//! One or two digit hour, `:`, two digit minute, optional whitespace and a
//! case-insensitive `AM`/`PM` suffix. Anything else is a
//! [`TimeParseError::Format`]; a matching string with hour outside 1-12 or
//! minute outside 0-59 is a [`TimeParseError::Range`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ShiftBoundary, TimeParseError};

static TWELVE_HOUR_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([0-9]{1,2}):([0-9]{2})\s*(AM|PM)$")
        .expect("12-hour time pattern must compile")
});

/// Parses a 12-hour clock string into a time of day.
///
/// # Examples
///
/// ```
/// use worktime_engine::calculation::parse_clock_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_clock_time("9:00 AM").unwrap(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
/// assert_eq!(parse_clock_time("6:30pm").unwrap(), NaiveTime::from_hms_opt(18, 30, 0).unwrap());
/// assert_eq!(parse_clock_time("12:15 AM").unwrap(), NaiveTime::from_hms_opt(0, 15, 0).unwrap());
/// assert!(parse_clock_time("18:00").is_err());
/// ```
pub fn parse_clock_time(input: &str) -> Result<NaiveTime, TimeParseError> {
    let format_error = || TimeParseError::Format {
        input: input.to_string(),
    };

    let captures = TWELVE_HOUR_TIME.captures(input).ok_or_else(format_error)?;
    let hour: u32 = captures[1].parse().map_err(|_| format_error())?;
    let minute: u32 = captures[2].parse().map_err(|_| format_error())?;

    let range_error = || TimeParseError::Range {
        input: input.to_string(),
        hour,
        minute,
    };

    if !(1..=12).contains(&hour) || minute > 59 {
        return Err(range_error());
    }

    let is_pm = captures[3].eq_ignore_ascii_case("PM");
    let hour_24 = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };

    NaiveTime::from_hms_opt(hour_24, minute, 0).ok_or_else(range_error)
}

/// Parses a 12-hour clock string and anchors it at midnight of `anchor`.
///
/// Only the calendar day of `anchor` is used.
///
/// # Example
///
/// ```
/// use worktime_engine::calculation::parse_time_of_day;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let day = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let shift_end = parse_time_of_day("6:00 PM", day).unwrap();
/// assert_eq!(
///     shift_end,
///     NaiveDateTime::parse_from_str("2026-01-15 18:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
/// );
/// ```
pub fn parse_time_of_day(input: &str, anchor: NaiveDate) -> Result<NaiveDateTime, TimeParseError> {
    Ok(anchor.and_time(parse_clock_time(input)?))
}

/// The substitute used for a boundary when a caller opts into defaults:
/// 9:00 AM for a shift start, 6:00 PM for a shift end.
pub fn default_boundary_time(boundary: ShiftBoundary) -> NaiveTime {
    match boundary {
        ShiftBoundary::Start => NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
        ShiftBoundary::End => NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
    }
}

/// Formats a time of day back into the configured 12-hour style.
pub fn format_clock_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}
