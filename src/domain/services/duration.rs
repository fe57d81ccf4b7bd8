//! Elapsed-time columns: `H:M:S` parsing and totals.
//!
//! Durations are carried as an exact nanosecond count in a
//! [`chrono::TimeDelta`] and rendered as fractional seconds with
//! [`format_compact`].

use chrono::TimeDelta;
use lazy_static::lazy_static;
use regex::Regex;

use super::number::format_compact;
use super::ConversionError;

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_MINUTE: i128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i128 = 60 * NANOS_PER_MINUTE;

// 超出這個位數的小數對奈秒已無影響
const MAX_FRACTION_DIGITS: usize = 18;
const MAX_INTEGER_DIGITS: usize = 20;

lazy_static! {
    // 12, 3.5, .5, 5. (不接受指數)
    static ref COMPONENT_RE: Regex =
        Regex::new(r"^([+-]?)(\d*)(?:\.(\d*))?$").unwrap();
    // 換算後的秒數，允許 format_compact 產生的指數形式
    static ref SECONDS_RE: Regex =
        Regex::new(r"^([+-]?)(\d*)(?:\.(\d*))?(?:[eE]([+-]?\d{1,4}))?$").unwrap();
}

/// Converts an `H:M:S` duration into compact fractional seconds.
///
/// Each component is a decimal numeral; fractions are allowed in any of
/// them. `"1:02:03.5"` becomes `"3723.5"`. Components past the third are
/// ignored.
pub fn convert_duration(duration: &str) -> Result<String, ConversionError> {
    let components: Vec<&str> = duration.splitn(4, ':').take(3).collect();
    if components.len() < 3 {
        return Err(ConversionError::Duration {
            value: duration.to_string(),
            reason: format!(
                "expected at least 3 ':'-separated components, found {}",
                components.len()
            ),
        });
    }

    let units = [NANOS_PER_HOUR, NANOS_PER_MINUTE, NANOS_PER_SECOND];
    let mut total = TimeDelta::zero();
    for (component, unit) in components.iter().zip(units) {
        let part = parse_component(component, unit).ok_or_else(|| ConversionError::Duration {
            value: duration.to_string(),
            reason: format!("'{}' is not a number", component),
        })?;
        total = total
            .checked_add(&part)
            .ok_or_else(|| ConversionError::Duration {
                value: duration.to_string(),
                reason: "duration out of range".to_string(),
            })?;
    }

    seconds(total)
        .map(format_compact)
        .ok_or_else(|| ConversionError::Duration {
            value: duration.to_string(),
            reason: "duration out of range".to_string(),
        })
}

/// Adds two values produced by [`convert_duration`].
pub fn calculate_duration(start: &str, end: &str) -> Result<String, ConversionError> {
    let parse = |value: &str| {
        parse_seconds(value).ok_or_else(|| ConversionError::Total {
            value: value.to_string(),
        })
    };
    let s = parse(start)?;
    let e = parse(end)?;

    let total = s.checked_add(&e).ok_or_else(|| ConversionError::Total {
        value: format!("{} + {}", start, end),
    })?;

    seconds(total)
        .map(format_compact)
        .ok_or_else(|| ConversionError::Total {
            value: format!("{} + {}", start, end),
        })
}

fn parse_component(component: &str, unit: i128) -> Option<TimeDelta> {
    let caps = COMPONENT_RE.captures(component)?;
    let int_part = caps.get(2).map_or("", |m| m.as_str());
    let frac_part = caps.get(3).map_or("", |m| m.as_str());
    let negative = &caps[1] == "-";
    decimal_to_delta(negative, int_part, frac_part, 0, unit)
}

fn parse_seconds(value: &str) -> Option<TimeDelta> {
    let caps = SECONDS_RE.captures(value)?;
    let int_part = caps.get(2).map_or("", |m| m.as_str());
    let frac_part = caps.get(3).map_or("", |m| m.as_str());
    let exponent = match caps.get(4) {
        Some(m) => m.as_str().parse::<i32>().ok()?,
        None => 0,
    };
    let negative = &caps[1] == "-";
    decimal_to_delta(negative, int_part, frac_part, exponent, NANOS_PER_SECOND)
}

/// Scales the decimal `int_part.frac_part × 10^exponent` by `unit`
/// nanoseconds, truncating anything below one nanosecond.
fn decimal_to_delta(
    negative: bool,
    int_part: &str,
    frac_part: &str,
    exponent: i32,
    unit: i128,
) -> Option<TimeDelta> {
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let int_part = int_part.trim_start_matches('0');
    if int_part.len() > MAX_INTEGER_DIGITS {
        return None;
    }
    let frac_part = &frac_part[..frac_part.len().min(MAX_FRACTION_DIGITS)];

    let mut mantissa: i128 = 0;
    for digit in int_part.bytes().chain(frac_part.bytes()) {
        mantissa = mantissa * 10 + i128::from(digit - b'0');
    }

    let mut scale = exponent - frac_part.len() as i32;
    let nanos = if mantissa == 0 {
        0
    } else if scale >= 0 {
        let mut value = mantissa.checked_mul(unit)?;
        while scale > 0 {
            value = value.checked_mul(10)?;
            scale -= 1;
        }
        value
    } else {
        // 先縮小尾數避免溢位，再除回剩餘的 10 的次方
        while scale < 0 && mantissa.checked_mul(unit).is_none() {
            mantissa /= 10;
            scale += 1;
        }
        let mut value = mantissa.checked_mul(unit)?;
        while scale < 0 && value != 0 {
            value /= 10;
            scale += 1;
        }
        value
    };

    let nanos = i64::try_from(nanos).ok()?;
    Some(TimeDelta::nanoseconds(if negative { -nanos } else { nanos }))
}

/// Whole seconds plus the nanosecond remainder, so integral durations stay
/// exact in the float.
fn seconds(delta: TimeDelta) -> Option<f64> {
    let nanos = delta.num_nanoseconds()?;
    let whole = nanos / NANOS_PER_SECOND as i64;
    let rem = nanos % NANOS_PER_SECOND as i64;
    Some(whole as f64 + rem as f64 / 1e9)
}
