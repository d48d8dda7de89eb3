//! Issue the registrations for one resolved field.

use crate::error::VenomError;
use crate::flags::{FlagSet, FlagSpec};
use crate::naming::qualify_env;
use crate::store::Store;
use crate::types::{Kind, Value};

/// Everything known about one field once its tags, names and default are resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Serialized field name; also the store key.
    pub name: &'static str,
    pub kind: Kind,
    pub long: Option<String>,
    pub short: Option<char>,
    /// Environment variable name before prefix qualification.
    pub env: Option<String>,
    pub help: &'static str,
    pub default_raw: &'static str,
    pub default: Value,
}

/// Register `field` with the store and, when it has a long name, the flag set.
///
/// Order: env binding, flag registration, default, flag binding. The default
/// is always stored under the field name, with or without a flag.
pub fn bind(
    field: &FieldDescriptor,
    prefix: &str,
    flags: &mut FlagSet,
    store: &mut Store,
) -> Result<(), VenomError> {
    if let Some(env) = field.env.as_deref().filter(|e| !e.is_empty()) {
        store.bind_env(field.name, &qualify_env(prefix, env));
    }

    let handle = match field.long.as_deref().filter(|l| !l.is_empty()) {
        Some(long) => {
            flags.register(FlagSpec {
                long,
                short: field.short,
                default: &field.default,
                help: field.help,
            });
            flags.lookup(long)
        }
        None => None,
    };

    store.set_default(field.name, field.default.clone());

    if let Some(handle) = handle {
        store.bind_flag(field.name, handle);
    }
    Ok(())
}

/// Convert a `short` tag into a flag character.
pub fn short_flag(field: &str, tag: Option<&str>) -> Result<Option<char>, VenomError> {
    let Some(tag) = tag else {
        return Ok(None);
    };
    let mut chars = tag.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Some(c)),
        _ => Err(VenomError::InvalidShortFlag {
            field: field.to_string(),
            value: tag.to_string(),
        }),
    }
}
