//! Turn textual defaults into typed values.
//!
//! Every [`Kind`] has one entry in a static table holding its parser, its zero
//! value and the adjustments its clap argument needs. Adding a kind means
//! adding a row here and a variant to [`Kind`]/[`Value`].

use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;
use std::time::Duration;

use clap::Arg;
use num_traits::{Float, Num};

use crate::duration::parse_duration;
use crate::error::CoercionError;
use crate::types::{Kind, Value};

pub(crate) struct KindEntry {
    pub kind: Kind,
    pub parse: fn(&str) -> Result<Value, CoercionError>,
    pub zero: fn() -> Value,
    pub configure: fn(Arg) -> Arg,
}

fn plain(arg: Arg) -> Arg {
    arg
}

/// `--flag` alone means true; `--flag=false` is still accepted.
fn switch(arg: Arg) -> Arg {
    arg.num_args(0..=1)
        .require_equals(true)
        .default_missing_value("true")
}

static TABLE: [KindEntry; 13] = [
    KindEntry {
        kind: Kind::String,
        parse: |s| Ok(Value::String(s.to_string())),
        zero: || Value::String(String::new()),
        configure: plain,
    },
    KindEntry {
        kind: Kind::Bool,
        parse: |s| parse_bool(s).map(Value::Bool),
        zero: || Value::Bool(false),
        configure: switch,
    },
    KindEntry {
        kind: Kind::I8,
        parse: |s| parse_int(s).map(Value::I8),
        zero: || Value::I8(0),
        configure: plain,
    },
    KindEntry {
        kind: Kind::I16,
        parse: |s| parse_int(s).map(Value::I16),
        zero: || Value::I16(0),
        configure: plain,
    },
    KindEntry {
        kind: Kind::I32,
        parse: |s| parse_int(s).map(Value::I32),
        zero: || Value::I32(0),
        configure: plain,
    },
    KindEntry {
        kind: Kind::I64,
        parse: |s| parse_int(s).map(Value::I64),
        zero: || Value::I64(0),
        configure: plain,
    },
    KindEntry {
        kind: Kind::U8,
        parse: |s| parse_int(s).map(Value::U8),
        zero: || Value::U8(0),
        configure: plain,
    },
    KindEntry {
        kind: Kind::U16,
        parse: |s| parse_int(s).map(Value::U16),
        zero: || Value::U16(0),
        configure: plain,
    },
    KindEntry {
        kind: Kind::U32,
        parse: |s| parse_int(s).map(Value::U32),
        zero: || Value::U32(0),
        configure: plain,
    },
    KindEntry {
        kind: Kind::U64,
        parse: |s| parse_int(s).map(Value::U64),
        zero: || Value::U64(0),
        configure: plain,
    },
    KindEntry {
        kind: Kind::F32,
        parse: |s| parse_float(s, Kind::F32).map(Value::F32),
        zero: || Value::F32(0.0),
        configure: plain,
    },
    KindEntry {
        kind: Kind::F64,
        parse: |s| parse_float(s, Kind::F64).map(Value::F64),
        zero: || Value::F64(0.0),
        configure: plain,
    },
    KindEntry {
        kind: Kind::Duration,
        parse: |s| Ok(Value::Duration(parse_duration(s)?)),
        zero: || Value::Duration(Duration::ZERO),
        configure: plain,
    },
];

pub(crate) fn entry(kind: Kind) -> &'static KindEntry {
    let entry = &TABLE[kind as usize];
    debug_assert_eq!(entry.kind, kind);
    entry
}

/// Coerce `raw` into a value of `kind`. Empty input yields the zero value.
pub fn coerce(kind: Kind, raw: &str) -> Result<Value, CoercionError> {
    let entry = entry(kind);
    if raw.is_empty() {
        Ok((entry.zero)())
    } else {
        (entry.parse)(raw)
    }
}

/// The zero value of `kind`.
pub fn zero(kind: Kind) -> Value {
    (entry(kind).zero)()
}

/// Strict boolean literal: `1 t T TRUE true True` or `0 f F FALSE false False`.
pub fn parse_bool(s: &str) -> Result<bool, CoercionError> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoercionError::Bool),
    }
}

/// Best-effort boolean: anything that does not parse is false.
pub fn is_true(s: &str) -> bool {
    parse_bool(s).unwrap_or(false)
}

/// Parse an integer literal sized to `T`.
///
/// Accepts an optional sign, the base prefixes `0x`, `0o`, `0b` and a bare
/// leading `0` for octal, and `_` between digits. A minus sign on an unsigned
/// type is a parse error.
pub fn parse_int<T>(s: &str) -> Result<T, CoercionError>
where
    T: Num<FromStrRadixErr = ParseIntError>,
{
    let (negative, body) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits, prefixed) = split_radix(body);
    if !underscores_ok(digits, prefixed) {
        return Err(CoercionError::IntSyntax);
    }
    let digits = digits.replace('_', "");
    if !digits.starts_with(|c: char| c.is_ascii_alphanumeric()) {
        return Err(CoercionError::IntSyntax);
    }

    let text = if negative { format!("-{digits}") } else { digits };
    Ok(T::from_str_radix(&text, radix)?)
}

/// Parse a float sized to `T`. A finite literal that overflows to infinity is
/// out of range; `inf` and `infinity` themselves are accepted.
fn parse_float<T>(s: &str, kind: Kind) -> Result<T, CoercionError>
where
    T: Float + FromStr<Err = ParseFloatError>,
{
    let value: T = s.parse()?;
    if value.is_infinite() && !names_infinity(s) {
        return Err(CoercionError::OutOfRange(kind));
    }
    Ok(value)
}

fn names_infinity(s: &str) -> bool {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    body.eq_ignore_ascii_case("inf") || body.eq_ignore_ascii_case("infinity")
}

fn split_radix(body: &str) -> (u32, &str, bool) {
    let lower = body.get(..2).map(str::to_ascii_lowercase);
    match lower.as_deref() {
        Some("0x") => (16, &body[2..], true),
        Some("0o") => (8, &body[2..], true),
        Some("0b") => (2, &body[2..], true),
        _ if body.len() > 1 && body.starts_with('0') => (8, &body[1..], true),
        _ => (10, body, false),
    }
}

/// Underscores must sit between digits, or directly after a base prefix.
fn underscores_ok(digits: &str, prefixed: bool) -> bool {
    if !digits.contains('_') {
        return true;
    }
    let bytes = digits.as_bytes();
    let mut prev_digit = prefixed;
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'_' {
            let next_digit = bytes.get(i + 1).is_some_and(u8::is_ascii_alphanumeric);
            if !prev_digit || !next_digit {
                return false;
            }
            prev_digit = false;
        } else {
            prev_digit = true;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_match_kind_order() {
        for kind in Kind::ALL {
            assert_eq!(entry(kind).kind, kind);
            assert_eq!(zero(kind).kind(), kind);
        }
    }

    #[test]
    fn empty_input_is_zero_value() {
        assert_eq!(coerce(Kind::String, "").unwrap(), Value::String(String::new()));
        assert_eq!(coerce(Kind::Bool, "").unwrap(), Value::Bool(false));
        assert_eq!(coerce(Kind::U16, "").unwrap(), Value::U16(0));
        assert_eq!(coerce(Kind::F64, "").unwrap(), Value::F64(0.0));
        assert_eq!(coerce(Kind::Duration, "").unwrap(), Value::Duration(Duration::ZERO));
    }

    #[test]
    fn string_is_verbatim() {
        assert_eq!(
            coerce(Kind::String, " spaced ").unwrap(),
            Value::String(" spaced ".into())
        );
    }

    #[test]
    fn bool_literals() {
        assert_eq!(coerce(Kind::Bool, "T").unwrap(), Value::Bool(true));
        assert_eq!(coerce(Kind::Bool, "0").unwrap(), Value::Bool(false));
        assert_eq!(coerce(Kind::Bool, "yes"), Err(CoercionError::Bool));
        assert_eq!(coerce(Kind::Bool, "tRUE"), Err(CoercionError::Bool));
    }

    #[test]
    fn signed_ints() {
        assert_eq!(coerce(Kind::I8, "-128").unwrap(), Value::I8(-128));
        assert_eq!(coerce(Kind::I32, "+42").unwrap(), Value::I32(42));
        assert_eq!(coerce(Kind::I64, "-0x10").unwrap(), Value::I64(-16));
    }

    #[test]
    fn signed_overflow_is_error() {
        assert!(matches!(coerce(Kind::I8, "128"), Err(CoercionError::Int(_))));
        assert!(matches!(coerce(Kind::I16, "40000"), Err(CoercionError::Int(_))));
    }

    #[test]
    fn unsigned_ints() {
        assert_eq!(coerce(Kind::U8, "255").unwrap(), Value::U8(255));
        assert_eq!(coerce(Kind::U64, "18446744073709551615").unwrap(), Value::U64(u64::MAX));
        assert!(matches!(coerce(Kind::U8, "256"), Err(CoercionError::Int(_))));
        assert!(matches!(coerce(Kind::U32, "-1"), Err(CoercionError::Int(_))));
    }

    #[test]
    fn base_prefixes() {
        assert_eq!(coerce(Kind::U16, "0xff").unwrap(), Value::U16(255));
        assert_eq!(coerce(Kind::U16, "0XFF").unwrap(), Value::U16(255));
        assert_eq!(coerce(Kind::U16, "0o17").unwrap(), Value::U16(15));
        assert_eq!(coerce(Kind::U16, "017").unwrap(), Value::U16(15));
        assert_eq!(coerce(Kind::U16, "0b101").unwrap(), Value::U16(5));
        assert_eq!(coerce(Kind::U16, "0").unwrap(), Value::U16(0));
    }

    #[test]
    fn digit_separators() {
        assert_eq!(coerce(Kind::U32, "1_000_000").unwrap(), Value::U32(1_000_000));
        assert_eq!(coerce(Kind::U32, "0x_ff").unwrap(), Value::U32(255));
        assert_eq!(coerce(Kind::U32, "_1"), Err(CoercionError::IntSyntax));
        assert_eq!(coerce(Kind::U32, "1__0"), Err(CoercionError::IntSyntax));
        assert_eq!(coerce(Kind::U32, "10_"), Err(CoercionError::IntSyntax));
    }

    #[test]
    fn not_a_number() {
        assert!(coerce(Kind::I32, "notanumber").is_err());
        assert_eq!(coerce(Kind::I32, "0x"), Err(CoercionError::IntSyntax));
        assert_eq!(coerce(Kind::I32, "--5"), Err(CoercionError::IntSyntax));
        assert_eq!(coerce(Kind::I32, "0x-5"), Err(CoercionError::IntSyntax));
    }

    #[test]
    fn floats() {
        assert_eq!(coerce(Kind::F32, "1.5").unwrap(), Value::F32(1.5));
        assert_eq!(coerce(Kind::F64, "-2e3").unwrap(), Value::F64(-2000.0));
        assert!(matches!(coerce(Kind::F64, "inf").unwrap(), Value::F64(v) if v.is_infinite()));
        assert!(matches!(coerce(Kind::F64, "abc"), Err(CoercionError::Float(_))));
    }

    #[test]
    fn float_overflow_is_out_of_range() {
        assert_eq!(
            coerce(Kind::F32, "1e40"),
            Err(CoercionError::OutOfRange(Kind::F32))
        );
        assert_eq!(
            coerce(Kind::F64, "-1e400"),
            Err(CoercionError::OutOfRange(Kind::F64))
        );
        assert_eq!(coerce(Kind::F64, "1e40").unwrap(), Value::F64(1e40));
        assert!(matches!(coerce(Kind::F32, "-Infinity").unwrap(), Value::F32(v) if v.is_infinite()));
    }

    #[test]
    fn durations() {
        assert_eq!(
            coerce(Kind::Duration, "5s").unwrap(),
            Value::Duration(Duration::from_secs(5))
        );
        assert!(matches!(
            coerce(Kind::Duration, "5"),
            Err(CoercionError::Duration(_))
        ));
    }

    #[test]
    fn is_true_is_best_effort() {
        assert!(is_true("true"));
        assert!(!is_true("false"));
        assert!(!is_true("maybe"));
        assert!(!is_true(""));
    }

    #[test]
    fn displayed_values_parse_back() {
        let values = [
            Value::Bool(true),
            Value::I16(-300),
            Value::U64(u64::MAX),
            Value::F32(0.25),
            Value::Duration(Duration::from_millis(1500)),
        ];
        for value in values {
            assert_eq!(coerce(value.kind(), &value.to_string()).unwrap(), value);
        }
    }
}
