//! Compound duration literals such as `"5s"`, `"1h30m"` or `"1.5ms"`.
//!
//! Grammar: an optional sign followed by one or more `<number><unit>` pairs,
//! where a number is decimal with an optional fraction and a unit is one of
//! `ns`, `us` (`µs`, `μs`), `ms`, `s`, `m`, `h`. The bare literal `"0"` needs
//! no unit. Totals are limited to `i64::MAX` nanoseconds.

use std::time::Duration;

use thiserror::Error;

const NANOS_PER_SEC: u128 = 1_000_000_000;
const MAX_NANOS: u128 = i64::MAX as u128;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("invalid duration '{0}'")]
    Invalid(String),

    #[error("missing unit in duration '{0}'")]
    MissingUnit(String),

    #[error("unknown unit '{unit}' in duration '{input}'")]
    UnknownUnit { unit: String, input: String },

    #[error("duration '{0}' is out of range")]
    Overflow(String),

    #[error("negative duration '{0}' is not representable")]
    Negative(String),
}

fn unit_nanos(unit: &str) -> Option<u128> {
    let n = match unit {
        "ns" => 1,
        "us" | "\u{00b5}s" | "\u{03bc}s" => 1_000,
        "ms" => 1_000_000,
        "s" => NANOS_PER_SEC,
        "m" => 60 * NANOS_PER_SEC,
        "h" => 3600 * NANOS_PER_SEC,
        _ => return None,
    };
    Some(n)
}

/// Parse a duration literal.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let invalid = || DurationError::Invalid(input.to_string());

    let mut rest = input;
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        if !rest.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, after_whole) = split_digits(rest);
        let whole_value = leading_int(whole).ok_or_else(|| DurationError::Overflow(input.into()))?;
        rest = after_whole;

        let mut fraction = "";
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (digits, after_fraction) = split_digits(after_dot);
            fraction = digits;
            rest = after_fraction;
        }
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        let unit_end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let unit = &rest[..unit_end];
        if unit.is_empty() {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;
        rest = &rest[unit_end..];

        let mut nanos = whole_value
            .checked_mul(scale)
            .filter(|n| *n <= MAX_NANOS)
            .ok_or_else(|| DurationError::Overflow(input.into()))?;
        nanos += fraction_nanos(fraction, scale);

        total += nanos;
        if total > MAX_NANOS {
            return Err(DurationError::Overflow(input.to_string()));
        }
    }

    if negative && total != 0 {
        return Err(DurationError::Negative(input.to_string()));
    }

    Ok(nanos_to_duration(total))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn leading_int(digits: &str) -> Option<u128> {
    digits.bytes().try_fold(0u128, |acc, b| {
        let next = acc.checked_mul(10)?.checked_add(u128::from(b - b'0'))?;
        (next <= MAX_NANOS).then_some(next)
    })
}

/// Contribution of the fractional digits, truncated toward zero.
/// Digits past nanosecond precision of the largest unit are dropped.
fn fraction_nanos(digits: &str, scale: u128) -> u128 {
    let mut value: u128 = 0;
    let mut divisor: u128 = 1;
    for b in digits.bytes().take(20) {
        value = value * 10 + u128::from(b - b'0');
        divisor *= 10;
    }
    value * scale / divisor
}

fn nanos_to_duration(nanos: u128) -> Duration {
    let secs = (nanos / NANOS_PER_SEC) as u64;
    let sub = (nanos % NANOS_PER_SEC) as u32;
    Duration::new(secs, sub)
}

/// Format a duration in the compound form `parse_duration` accepts, e.g.
/// `"1h30m0s"`, `"2.5s"`, `"750ms"`, `"0s"`.
pub fn format_duration(d: Duration) -> String {
    let total = d.as_nanos();
    if total == 0 {
        return "0s".to_string();
    }

    if total < NANOS_PER_SEC {
        return if total < 1_000 {
            format!("{total}ns")
        } else if total < 1_000_000 {
            format!("{}\u{00b5}s", decimal(total, 3))
        } else {
            format!("{}ms", decimal(total, 6))
        };
    }

    let secs = total / NANOS_PER_SEC;
    let sub = total % NANOS_PER_SEC;
    let hours = secs / 3600;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&decimal(seconds * NANOS_PER_SEC + sub, 9));
    out.push('s');
    out
}

/// Render `value / 10^precision` with trailing fractional zeros removed.
fn decimal(value: u128, precision: u32) -> String {
    let divisor = 10u128.pow(precision);
    let whole = value / divisor;
    let fraction = value % divisor;
    if fraction == 0 {
        return whole.to_string();
    }
    let digits = format!("{fraction:0width$}", width = precision as usize);
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds() {
        assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
    }

    #[test]
    fn compound_hours_minutes() {
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
    }

    #[test]
    fn fractional_value() {
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration(".5m").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("2.h").unwrap(), Duration::from_secs(7200));
    }

    #[test]
    fn sub_second_units() {
        assert_eq!(parse_duration("300ms").unwrap(), Duration::from_millis(300));
        assert_eq!(parse_duration("10us").unwrap(), Duration::from_micros(10));
        assert_eq!(parse_duration("10\u{00b5}s").unwrap(), Duration::from_micros(10));
        assert_eq!(parse_duration("10\u{03bc}s").unwrap(), Duration::from_micros(10));
        assert_eq!(parse_duration("7ns").unwrap(), Duration::from_nanos(7));
    }

    #[test]
    fn bare_zero_needs_no_unit() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("-0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("+0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn plus_sign_accepted() {
        assert_eq!(parse_duration("+2m").unwrap(), Duration::from_secs(120));
    }

    #[test]
    fn missing_unit_rejected() {
        assert_eq!(
            parse_duration("10"),
            Err(DurationError::MissingUnit("10".into()))
        );
    }

    #[test]
    fn unknown_unit_rejected() {
        assert!(matches!(
            parse_duration("3d"),
            Err(DurationError::UnknownUnit { ref unit, .. }) if unit == "d"
        ));
    }

    #[test]
    fn garbage_rejected() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("notaduration").is_err());
        assert!(parse_duration(".s").is_err());
        assert!(parse_duration("-").is_err());
    }

    #[test]
    fn negative_rejected() {
        assert_eq!(
            parse_duration("-5s"),
            Err(DurationError::Negative("-5s".into()))
        );
    }

    #[test]
    fn overflow_rejected() {
        assert!(matches!(
            parse_duration("9999999999999h"),
            Err(DurationError::Overflow(_))
        ));
    }

    #[test]
    fn format_examples() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_secs(5)), "5s");
        assert_eq!(format_duration(Duration::from_secs(5400)), "1h30m0s");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_millis(750)), "750ms");
        assert_eq!(format_duration(Duration::from_micros(15)), "15\u{00b5}s");
        assert_eq!(format_duration(Duration::from_nanos(42)), "42ns");
        assert_eq!(format_duration(Duration::from_secs(65)), "1m5s");
    }

    #[test]
    fn formatted_output_parses_back() {
        for d in [
            Duration::from_secs(3601),
            Duration::from_millis(2250),
            Duration::from_micros(1234),
            Duration::from_nanos(999),
        ] {
            assert_eq!(parse_duration(&format_duration(d)).unwrap(), d);
        }
    }
}
