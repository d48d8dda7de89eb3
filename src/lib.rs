//! Bind the fields of a configuration struct to command-line flags,
//! environment variables, and defaults in one pass.
//!
//! Venom walks a struct's fields, reads a small set of per-field tags, and
//! registers each field three ways: a typed flag in a [`FlagSet`], an
//! environment variable binding in a [`Store`], and a coerced default value in
//! that same store. Every binding is keyed by the field's serialized name, so
//! the resolved settings deserialize straight back into the struct.
//!
//! ```ignore
//! #[derive(Serialize, Deserialize, Default)]
//! #[serde(rename_all = "PascalCase")]
//! struct Config {
//!     log_level: String,
//!     request_timeout: Duration,
//! }
//!
//! venom::tags! {
//!     Config {
//!         "LogLevel" => { default: "info", short: "v", help: "Log verbosity" },
//!         "RequestTimeout" => { d: "5s" },
//!     }
//! }
//!
//! let args: Vec<String> = std::env::args().collect();
//! let mut store = Store::new();
//! let flags = Venom::builder()
//!     .prefix("APP")
//!     .new_configuration(&Config::default(), &mut store, &args)?;
//!
//! store.load_process_env();
//! store.apply_matches(&flags.parse(&args)?);
//! let config: Config = store.unmarshal()?;
//! ```
//!
//! That registers `--log_level`/`-v` and `--request_timeout`, binds
//! `APP_LOG_LEVEL` and `APP_REQUEST_TIMEOUT`, and stores `"info"` and five
//! seconds as defaults under `LogLevel` and `RequestTimeout`.
//!
//! # Design: struct as source of truth
//!
//! The struct's `Serialize` implementation decides which fields exist, their
//! order, their names, and their types. Tags supply everything serde cannot:
//!
//! | tag       | alias | effect                                              |
//! |-----------|-------|-----------------------------------------------------|
//! | `long`    | `l`   | long flag name, used verbatim                       |
//! | `short`   | `s`   | one-character flag alias                            |
//! | `default` | `d`   | textual default, coerced to the field's type        |
//! | `env`     | `e`   | environment variable name, prefixed unless it already is |
//! | `help`    | `h`   | flag help text                                      |
//! | `ignored` |       | skip the field entirely when it parses as true      |
//!
//! Untagged fields get derived names: `RequestTimeout` becomes the flag
//! `request_timeout` and the variable `REQUEST_TIMEOUT`, which the prefix
//! turns into `APP_REQUEST_TIMEOUT`. [`ProcessingOptions`] controls whether
//! those names are derived at all; explicit tags always apply.
//!
//! # Supported field types
//!
//! `String`, `bool`, every fixed-width signed and unsigned integer, `f32`,
//! `f64`, and [`std::time::Duration`]. Newtype wrappers around these are
//! looked through. Fields of any other type are skipped and reported to the
//! [`Observer`] as [`SkipReason::Unsupported`]; fields serde never serializes
//! (`#[serde(skip)]`) are not seen at all.
//!
//! Integers accept `0x`, `0o`, `0b` and `0` prefixes plus `_` separators.
//! Booleans accept `1`, `t`, `T`, `TRUE`, `true`, `True` and their false
//! counterparts. Durations use sequences like `1h30m`, `1.5s`, or `250ms`.
//!
//! # Layer precedence
//!
//! ```text
//! Defaults             tag `default`, or the type's zero value
//!        ↑ overridden by
//! Config file          Store::read_config_file
//!        ↑ overridden by
//! Environment vars     bound names only, empty values are unset
//!        ↑ overridden by
//! Command line         flags the user actually passed
//! ```
//!
//! Flags left at their registered default never mask a lower layer.
//!
//! # Logging
//!
//! Binding progress is reported through [`Observer`]. The default
//! [`TracingObserver`] emits `tracing` events: `trace` per field started and
//! `debug` for skips, resolved names and resolved defaults. Install
//! [`NoopObserver`] or your own implementation with
//! [`VenomBuilder::observer`].
//!
//! # Error handling
//!
//! All fallible operations return [`VenomError`]. A default that cannot be
//! coerced stops the pass at that field; fields already processed keep their
//! bindings. See the [`error`] module for the full set.

pub mod error;
pub mod types;

mod bind;
mod builder;
mod coerce;
mod duration;
mod flags;
mod naming;
mod observer;
mod store;
mod tags;
mod tokenize;
mod walk;

#[cfg(test)]
mod fixtures;

pub use bind::{FieldDescriptor, bind, short_flag};
pub use builder::{Venom, VenomBuilder, add_configuration, new_configuration};
pub use coerce::{coerce, is_true, parse_bool, parse_int, zero};
pub use duration::{DurationError, format_duration, parse_duration};
pub use error::{CoercionError, VenomError};
pub use flags::{FlagHandle, FlagSet, FlagSpec};
pub use naming::{DerivedNames, Naming, qualify_env};
pub use observer::{NoopObserver, Observer, SkipReason, TracingObserver};
pub use store::{Source, Store};
pub use tags::{FieldTags, Spec, Tags};
pub use tokenize::split_words;
pub use types::{Kind, ProcessingOptions, Value};
pub use walk::{probe_kind, walk_fields};
