use std::fmt;
use std::time::Duration;

use bitflags::bitflags;

use crate::duration;

bitflags! {
    /// Controls which names are derived for fields that carry no explicit tag.
    ///
    /// An explicit `long` or `env` tag always produces a binding, whatever the
    /// options say. The bits only govern derivation from the field name.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ProcessingOptions: u32 {
        /// Derive an environment variable for every field.
        const WITH_ENV = 0x1;
        /// Derive a long flag for every field.
        const WITH_FLAG = 0x2;
    }
}

impl ProcessingOptions {
    /// No derivation: only explicitly tagged names are bound.
    pub const NONE: Self = Self::empty();
    /// Derive both environment variables and long flags.
    pub const DEFAULT: Self = Self::WITH_ENV.union(Self::WITH_FLAG);
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The field types the binder knows how to register.
///
/// The discriminant order matches the coercion table in `coerce`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Duration,
}

impl Kind {
    pub const ALL: [Kind; 13] = [
        Kind::String,
        Kind::Bool,
        Kind::I8,
        Kind::I16,
        Kind::I32,
        Kind::I64,
        Kind::U8,
        Kind::U16,
        Kind::U32,
        Kind::U64,
        Kind::F32,
        Kind::F64,
        Kind::Duration,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Bool => "bool",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Duration => "duration",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed configuration value, one variant per [`Kind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Duration(Duration),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Bool(_) => Kind::Bool,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::Duration(_) => Kind::Duration,
        }
    }

    /// Convert into the JSON shape serde expects when deserializing the field.
    ///
    /// Durations use serde's `{secs, nanos}` representation. Non-finite floats
    /// have no JSON form and become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::String(s) => Json::String(s.clone()),
            Value::Bool(b) => Json::Bool(*b),
            Value::I8(v) => Json::from(*v),
            Value::I16(v) => Json::from(*v),
            Value::I32(v) => Json::from(*v),
            Value::I64(v) => Json::from(*v),
            Value::U8(v) => Json::from(*v),
            Value::U16(v) => Json::from(*v),
            Value::U32(v) => Json::from(*v),
            Value::U64(v) => Json::from(*v),
            Value::F32(v) => serde_json::Number::from_f64(f64::from(*v))
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::F64(v) => serde_json::Number::from_f64(*v)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::Duration(d) => serde_json::json!({
                "secs": d.as_secs(),
                "nanos": d.subsec_nanos(),
            }),
        }
    }
}

/// Renders the value as a literal the matching coercion parser accepts.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Duration(d) => f.write_str(&duration::format_duration(*d)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_enable_both() {
        let opts = ProcessingOptions::default();
        assert!(opts.contains(ProcessingOptions::WITH_ENV));
        assert!(opts.contains(ProcessingOptions::WITH_FLAG));
        assert_eq!(opts.bits(), 0x3);
    }

    #[test]
    fn none_options_are_empty() {
        assert!(ProcessingOptions::NONE.is_empty());
    }

    #[test]
    fn value_reports_its_kind() {
        assert_eq!(Value::U16(8080).kind(), Kind::U16);
        assert_eq!(Value::Duration(Duration::ZERO).kind(), Kind::Duration);
        assert_eq!(Value::String(String::new()).kind(), Kind::String);
    }

    #[test]
    fn duration_displays_compound() {
        let v = Value::Duration(Duration::from_secs(5400));
        assert_eq!(v.to_string(), "1h30m0s");
    }

    #[test]
    fn duration_json_matches_serde_shape() {
        let v = Value::Duration(Duration::new(5, 250));
        assert_eq!(v.to_json(), serde_json::json!({"secs": 5, "nanos": 250}));
    }

    #[test]
    fn u64_json_keeps_full_range() {
        let v = Value::U64(u64::MAX);
        assert_eq!(v.to_json().as_u64(), Some(u64::MAX));
    }

    #[test]
    fn nan_json_is_null() {
        assert!(Value::F64(f64::NAN).to_json().is_null());
    }
}
