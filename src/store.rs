//! Key/value configuration store.
//!
//! The binder only writes here: defaults, env bindings and flag bindings, all
//! keyed by field name. Values are then resolved per key from four layers,
//! highest first:
//!
//! ```text
//! Flag set on the command line   apply_matches()
//!        ↑ overrides
//! Bound environment variable     load_env() / load_process_env()
//!        ↑ overrides
//! Config file                    merge_toml() / read_config_file()
//!        ↑ overrides
//! Default                        set_default()
//! ```
//!
//! Textual env values and file values are coerced to the kind of the key's
//! default. A store is a plain value: create one per configuration.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use clap::ArgMatches;
use clap::parser::ValueSource;
use serde::de::DeserializeOwned;
use toml::Table;
use tracing::trace;

use crate::coerce;
use crate::error::{CoercionError, VenomError};
use crate::flags::FlagHandle;
use crate::types::{Kind, Value};

/// Which layer a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Flag,
    /// The environment variable that supplied the value.
    Env(String),
    File,
    Default,
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    defaults: BTreeMap<String, Value>,
    env_bindings: BTreeMap<String, String>,
    flag_bindings: BTreeMap<String, FlagHandle>,
    flag_values: HashMap<String, Value>,
    file: Table,
    env: HashMap<String, String>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_default(&mut self, key: &str, value: Value) {
        self.defaults.insert(key.to_string(), value);
    }

    pub fn bind_env(&mut self, key: &str, env: &str) {
        self.env_bindings.insert(key.to_string(), env.to_string());
    }

    pub fn bind_flag(&mut self, key: &str, handle: FlagHandle) {
        self.flag_bindings.insert(key.to_string(), handle);
    }

    pub fn default_value(&self, key: &str) -> Option<&Value> {
        self.defaults.get(key)
    }

    pub fn env_binding(&self, key: &str) -> Option<&str> {
        self.env_bindings.get(key).map(String::as_str)
    }

    pub fn flag_binding(&self, key: &str) -> Option<&FlagHandle> {
        self.flag_bindings.get(key)
    }

    /// Every key known to the store, sorted.
    pub fn keys(&self) -> BTreeSet<&str> {
        self.defaults
            .keys()
            .chain(self.env_bindings.keys())
            .chain(self.flag_bindings.keys())
            .map(String::as_str)
            .collect()
    }

    /// Replace the environment snapshot.
    ///
    /// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
    pub fn load_env(&mut self, vars: impl IntoIterator<Item = (String, String)>) {
        self.env = vars.into_iter().collect();
    }

    /// Snapshot the process environment.
    pub fn load_process_env(&mut self) {
        self.load_env(std::env::vars());
    }

    /// Merge a flat TOML document into the file layer. Later documents win.
    pub fn merge_toml(&mut self, path: &Path, content: &str) -> Result<(), VenomError> {
        let table: Table = toml::from_str(content).map_err(|e| VenomError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.file.extend(table);
        Ok(())
    }

    /// Read a TOML file and merge it into the file layer.
    pub fn read_config_file(&mut self, path: &Path) -> Result<(), VenomError> {
        let content = std::fs::read_to_string(path).map_err(|e| VenomError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.merge_toml(path, &content)
    }

    /// Record the values of bound flags that were given on the command line.
    ///
    /// Flags left at their registered default do not override lower layers.
    pub fn apply_matches(&mut self, matches: &ArgMatches) {
        for (key, handle) in &self.flag_bindings {
            let id = handle.id();
            if !matches.ids().any(|m| m.as_str() == id) {
                continue;
            }
            if matches.value_source(id) != Some(ValueSource::CommandLine) {
                continue;
            }
            if let Ok(Some(value)) = matches.try_get_one::<Value>(id) {
                trace!(key = key.as_str(), flag = id, %value, "flag set on command line");
                self.flag_values.insert(key.clone(), value.clone());
            }
        }
    }

    fn kind_of(&self, key: &str) -> Kind {
        self.defaults.get(key).map_or(Kind::String, Value::kind)
    }

    /// Resolve `key`, reporting which layer supplied the value.
    pub fn get_with_source(&self, key: &str) -> Result<Option<(Value, Source)>, VenomError> {
        if let Some(value) = self.flag_values.get(key) {
            return Ok(Some((value.clone(), Source::Flag)));
        }

        let kind = self.kind_of(key);
        let invalid = |value: String, source: CoercionError| VenomError::InvalidValue {
            key: key.to_string(),
            value,
            source,
        };

        if let Some(name) = self.env_bindings.get(key)
            && let Some(raw) = self.env.get(name).filter(|v| !v.is_empty())
        {
            let value = coerce::coerce(kind, raw).map_err(|e| invalid(raw.clone(), e))?;
            return Ok(Some((value, Source::Env(name.clone()))));
        }

        if let Some(raw) = self.file.get(key) {
            let value = from_toml(kind, raw).map_err(|e| invalid(raw.to_string(), e))?;
            return Ok(Some((value, Source::File)));
        }

        Ok(self
            .defaults
            .get(key)
            .map(|value| (value.clone(), Source::Default)))
    }

    /// Resolve `key` through all layers.
    pub fn get(&self, key: &str) -> Result<Option<Value>, VenomError> {
        Ok(self.get_with_source(key)?.map(|(value, _)| value))
    }

    /// Resolve every key.
    pub fn settings(&self) -> Result<BTreeMap<String, Value>, VenomError> {
        let mut out = BTreeMap::new();
        for key in self.keys() {
            if let Some(value) = self.get(key)? {
                out.insert(key.to_string(), value);
            }
        }
        Ok(out)
    }

    /// Deserialize the resolved settings into `T`, matching keys to field names.
    ///
    /// Fields that were never bound (ignored or skipped) are absent, so they
    /// need `#[serde(default)]` on the target.
    pub fn unmarshal<T: DeserializeOwned>(&self) -> Result<T, VenomError> {
        let object: serde_json::Map<String, serde_json::Value> = self
            .settings()?
            .into_iter()
            .map(|(key, value)| (key, value.to_json()))
            .collect();
        Ok(serde_json::from_value(serde_json::Value::Object(object))?)
    }
}

/// Coerce a TOML value to `kind`. Strings go through the textual parsers.
fn from_toml(kind: Kind, raw: &toml::Value) -> Result<Value, CoercionError> {
    let mismatch = |found| CoercionError::TypeMismatch {
        expected: kind,
        found,
    };
    match raw {
        toml::Value::String(s) => coerce::coerce(kind, s),
        toml::Value::Boolean(b) => match kind {
            Kind::Bool => Ok(Value::Bool(*b)),
            Kind::String => Ok(Value::String(b.to_string())),
            _ => Err(mismatch("boolean")),
        },
        toml::Value::Integer(i) => integer_to(kind, *i).ok_or_else(|| match kind {
            Kind::Bool | Kind::Duration => mismatch("integer"),
            _ => CoercionError::OutOfRange(kind),
        }),
        toml::Value::Float(f) => match kind {
            Kind::F32 => {
                let narrowed = *f as f32;
                if narrowed.is_infinite() && f.is_finite() {
                    Err(CoercionError::OutOfRange(kind))
                } else {
                    Ok(Value::F32(narrowed))
                }
            }
            Kind::F64 => Ok(Value::F64(*f)),
            Kind::String => Ok(Value::String(f.to_string())),
            _ => Err(mismatch("float")),
        },
        toml::Value::Datetime(_) => Err(mismatch("datetime")),
        toml::Value::Array(_) => Err(mismatch("array")),
        toml::Value::Table(_) => Err(mismatch("table")),
    }
}

fn integer_to(kind: Kind, i: i64) -> Option<Value> {
    let value = match kind {
        Kind::String => Value::String(i.to_string()),
        Kind::I8 => Value::I8(i8::try_from(i).ok()?),
        Kind::I16 => Value::I16(i16::try_from(i).ok()?),
        Kind::I32 => Value::I32(i32::try_from(i).ok()?),
        Kind::I64 => Value::I64(i),
        Kind::U8 => Value::U8(u8::try_from(i).ok()?),
        Kind::U16 => Value::U16(u16::try_from(i).ok()?),
        Kind::U32 => Value::U32(u32::try_from(i).ok()?),
        Kind::U64 => Value::U64(u64::try_from(i).ok()?),
        Kind::F32 => Value::F32(i as f32),
        Kind::F64 => Value::F64(i as f64),
        Kind::Bool | Kind::Duration => return None,
    };
    Some(value)
}
