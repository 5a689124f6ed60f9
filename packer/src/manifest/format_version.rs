//! Coercion of the loosely typed `format_version` field.
//!
//! Packs in the wild write the version as `2`, `"2"`, or `2.0`. All three are
//! folded into one integer here; anything else yields `None`.

use serde_json::{Number, Value};

/// Format versions this validator accepts.
pub const SUPPORTED_FORMAT_VERSIONS: [i64; 2] = [1, 2];

/// Coerce a raw `format_version` value to an integer.
///
/// Accepts a JSON integer, a JSON float without a fractional part, or a
/// string whose trimmed contents are one of those. The check runs on the
/// decimal text, so `2.0000000000000000001` is not taken for `2`.
///
/// # Examples
///
/// ```
/// use packy_packer::manifest::format_version::coerce_format_version;
/// use serde_json::json;
///
/// assert_eq!(coerce_format_version(&json!(2)), Some(2));
/// assert_eq!(coerce_format_version(&json!("1")), Some(1));
/// assert_eq!(coerce_format_version(&json!(2.0)), Some(2));
/// assert_eq!(coerce_format_version(&json!(1.5)), None);
/// assert_eq!(coerce_format_version(&json!(true)), None);
/// ```
#[must_use]
pub fn coerce_format_version(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number_to_i64(number),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed
                .parse::<Number>()
                .ok()
                .and_then(|number| number_to_i64(&number))
        }
        _ => None,
    }
}

/// Return `true` when `value` coerces to a supported format version.
#[must_use]
pub fn is_supported_format_version(value: Option<&Value>) -> bool {
    value
        .and_then(coerce_format_version)
        .is_some_and(|version| SUPPORTED_FORMAT_VERSIONS.contains(&version))
}

fn number_to_i64(number: &Number) -> Option<i64> {
    number.as_i64().or_else(|| integral_decimal(number.as_str()))
}

/// Read JSON number text such as `2.000`, `20e-1` or `-1.0` as an integer.
///
/// Returns `None` when any non-zero digit falls after the decimal point or
/// the value does not fit in an `i64`.
fn integral_decimal(text: &str) -> Option<i64> {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text),
    };
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().ok()?),
        None => (unsigned, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() {
        return None;
    }
    let digits: Vec<i64> = whole
        .chars()
        .chain(fraction.chars())
        .map(|ch| ch.to_digit(10).map(i64::from))
        .collect::<Option<_>>()?;

    // Digits at or past `point` sit after the decimal point.
    let point = i64::try_from(whole.len()).ok()?.checked_add(exponent)?;
    let mut value: i64 = 0;
    for (position, digit) in (0_i64..).zip(digits.iter().copied()) {
        if position < point {
            value = value.checked_mul(10)?.checked_add(sign * digit)?;
        } else if digit != 0 {
            return None;
        }
    }
    if value != 0 {
        let padding = point.saturating_sub(i64::try_from(digits.len()).ok()?);
        for _ in 0..padding {
            value = value.checked_mul(10)?;
        }
    }
    Some(value)
}
