//! `M/D/YY h:mm:ss AM|PM` → `YYYY-MM-DDTHH:MM:SS` with a fixed shift.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use lazy_static::lazy_static;
use regex::Regex;

use super::ConversionError;

/// Hours added to every timestamp (source zone to destination zone).
pub const DEFAULT_SHIFT_HOURS: i64 = 3;

pub const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

lazy_static! {
    static ref TIMESTAMP_RE: Regex =
        Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2}) (\d{1,2}):(\d{2}):(\d{2})(?:[.,]\d+)? (AM|PM)$")
            .unwrap();
}

/// Parses a 12-hour, two-digit-year timestamp into a naive wall-clock time.
/// A fractional second after the seconds field is accepted and dropped.
pub fn parse_timestamp(timestamp: &str) -> Result<NaiveDateTime, ConversionError> {
    let invalid = || ConversionError::Timestamp {
        value: timestamp.to_string(),
    };

    let caps = TIMESTAMP_RE.captures(timestamp).ok_or_else(invalid)?;
    let number = |i: usize| caps[i].parse::<u32>().map_err(|_| invalid());

    let month = number(1)?;
    let day = number(2)?;
    let year = expand_year(number(3)?);
    let hour = number(4)?;
    let minute = number(5)?;
    let second = number(6)?;

    if hour > 12 {
        return Err(invalid());
    }
    let hour = match (&caps[7], hour) {
        ("AM", 12) => 0,
        ("AM", h) => h,
        ("PM", 12) => 12,
        (_, h) => h + 12,
    };

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(invalid)?;
    Ok(NaiveDateTime::new(date, time))
}

/// Converts `timestamp` and shifts it by `shift_hours`.
///
/// The shift is plain clock arithmetic: no daylight-saving rules apply.
pub fn convert_timestamp(timestamp: &str, shift_hours: i64) -> Result<String, ConversionError> {
    let parsed = parse_timestamp(timestamp)?;
    let shifted = TimeDelta::try_hours(shift_hours)
        .and_then(|shift| parsed.checked_add_signed(shift))
        .ok_or_else(|| ConversionError::Timestamp {
            value: timestamp.to_string(),
        })?;
    Ok(shifted.format(OUTPUT_FORMAT).to_string())
}

// 69-99 為 19xx，00-68 為 20xx
fn expand_year(yy: u32) -> i32 {
    let yy = yy as i32;
    if yy >= 69 {
        1900 + yy
    } else {
        2000 + yy
    }
}
