use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;

use thiserror::Error;

use crate::duration::DurationError;
use crate::types::Kind;

#[derive(Debug, Error)]
pub enum VenomError {
    #[error("Configuration specification must be a reference to a struct")]
    SpecificationType,

    #[error("Invalid default '{value}' for field '{field}': {source}")]
    Coercion {
        field: String,
        value: String,
        source: CoercionError,
    },

    #[error("Invalid short flag '{value}' for field '{field}' (expected a single character)")]
    InvalidShortFlag { field: String, value: String },

    #[error("Argument vector is empty, cannot derive a program name")]
    MissingProgramName,

    #[error(transparent)]
    Flag(#[from] clap::Error),

    #[error("Invalid value '{value}' for '{key}': {source}")]
    InvalidValue {
        key: String,
        value: String,
        source: CoercionError,
    },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to unmarshal configuration: {0}")]
    Unmarshal(#[from] serde_json::Error),

    #[error("Failed to serialize specification: {0}")]
    Serialize(String),
}

impl serde::ser::Error for VenomError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        VenomError::Serialize(msg.to_string())
    }
}

/// Why a piece of text could not become a value of a given [`Kind`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    #[error("invalid boolean literal")]
    Bool,

    #[error("invalid integer: {0}")]
    Int(#[from] ParseIntError),

    #[error("invalid integer literal")]
    IntSyntax,

    #[error("invalid float: {0}")]
    Float(#[from] ParseFloatError),

    #[error(transparent)]
    Duration(#[from] DurationError),

    #[error("value out of range for {0}")]
    OutOfRange(Kind),

    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coercion_formats_field_and_value() {
        let err = VenomError::Coercion {
            field: "Port".into(),
            value: "notanumber".into(),
            source: CoercionError::IntSyntax,
        };
        let msg = err.to_string();
        assert!(msg.contains("Port"));
        assert!(msg.contains("notanumber"));
        assert!(msg.contains("integer"));
    }

    #[test]
    fn short_flag_formats() {
        let err = VenomError::InvalidShortFlag {
            field: "Verbose".into(),
            value: "vv".into(),
        };
        assert!(err.to_string().contains("single character"));
    }

    #[test]
    fn out_of_range_names_kind() {
        let err = CoercionError::OutOfRange(Kind::U8);
        assert_eq!(err.to_string(), "value out of range for u8");
    }

    #[test]
    fn custom_serialize_error_is_captured() {
        let err = <VenomError as serde::ser::Error>::custom("boom");
        assert!(matches!(err, VenomError::Serialize(ref m) if m == "boom"));
    }
}
