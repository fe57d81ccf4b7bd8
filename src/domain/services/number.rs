//! Compact rendering of floating point values.

/// Exponents at or above this switch to scientific notation.
const SCIENTIFIC_UPPER: i32 = 6;
/// Exponents below this switch to scientific notation.
const SCIENTIFIC_LOWER: i32 = -4;

/// Formats `value` with the fewest digits that round-trip.
///
/// Plain decimal notation is used while the decimal exponent stays within
/// `-4..6`; outside that window the value is written as `d.ddde±XX`, with a
/// sign and at least two exponent digits (`1.234567e+06`, `5e-05`).
pub fn format_compact(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    // `{:e}` 已是最短表示，例如 "1.234567e6"
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return value.to_string(),
    };

    if exponent < SCIENTIFIC_LOWER || exponent >= SCIENTIFIC_UPPER {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else {
        value.to_string()
    }
}
