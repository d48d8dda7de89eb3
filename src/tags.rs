//! Per-field metadata tags and their resolution.
//!
//! Each field may carry string tags keyed by name. Every key has a one-letter
//! alias; the full name wins when both are present and non-empty.
//!
//! | key       | alias | meaning                                   |
//! |-----------|-------|-------------------------------------------|
//! | `long`    | `l`   | long flag name                            |
//! | `short`   | `s`   | single-character flag alias               |
//! | `default` | `d`   | textual default, coerced to the field type |
//! | `env`     | `e`   | environment variable name                 |
//! | `help`    | `h`   | flag help text                            |
//! | `ignored` |       | skip the field when it parses as `true`   |

use serde::Serialize;

use crate::coerce;

/// Raw tags attached to one field, as `(key, value)` pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tags(&'static [(&'static str, &'static str)]);

impl Tags {
    pub const EMPTY: Tags = Tags(&[]);

    pub const fn new(pairs: &'static [(&'static str, &'static str)]) -> Self {
        Tags(pairs)
    }

    /// Value of the first tag named `key`. Empty values count as absent.
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .filter(|v| !v.is_empty())
    }

    /// Value of `key`, falling back to `alias` only when `key` is absent.
    pub fn get_aliased(&self, key: &str, alias: &str) -> Option<&'static str> {
        self.get(key).or_else(|| self.get(alias))
    }
}

/// A configuration struct whose fields can be bound to flags and env vars.
///
/// The struct's `Serialize` implementation defines which fields exist, their
/// order, their names (store keys) and their types. Fields serde never sees,
/// such as `#[serde(skip)]` ones, are not bound. Tags are looked up by the
/// serialized field name; the [`tags!`](crate::tags!) macro writes this impl.
pub trait Spec: Serialize {
    fn tags(_field: &str) -> Tags {
        Tags::EMPTY
    }
}

/// Tag values resolved for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTags {
    pub long: Option<&'static str>,
    pub short: Option<&'static str>,
    pub default: Option<&'static str>,
    pub env: Option<&'static str>,
    pub help: Option<&'static str>,
    pub ignored: bool,
}

impl FieldTags {
    pub fn resolve(tags: &Tags) -> Self {
        Self {
            long: tags.get_aliased("long", "l"),
            short: tags.get_aliased("short", "s"),
            default: tags.get_aliased("default", "d"),
            env: tags.get_aliased("env", "e"),
            help: tags.get_aliased("help", "h"),
            ignored: tags.get("ignored").is_some_and(coerce::is_true),
        }
    }
}

/// Implement [`Spec`] for a struct by listing tags per serialized field name.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// #[serde(rename_all = "PascalCase")]
/// struct Config {
///     log_level: String,
///     timeout: std::time::Duration,
/// }
///
/// venom::tags! {
///     Config {
///         "LogLevel" => { default: "info", help: "Log verbosity", s: "v" },
///         "Timeout" => { d: "5s" },
///     }
/// }
/// ```
#[macro_export]
macro_rules! tags {
    ($ty:ty { $($field:literal => { $($key:ident : $value:literal),* $(,)? }),* $(,)? }) => {
        impl $crate::Spec for $ty {
            fn tags(field: &str) -> $crate::Tags {
                match field {
                    $($field => $crate::Tags::new(&[$((stringify!($key), $value)),*]),)*
                    _ => $crate::Tags::EMPTY,
                }
            }
        }
    };
}
