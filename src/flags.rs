//! Flag registry backed by clap.
//!
//! A [`FlagSet`] collects one [`clap::Arg`] per bound field. Each argument's
//! value parser is the coercion parser for the field's kind, so parsed values
//! come back out of [`clap::ArgMatches`] as [`Value`]s. Help printing and exit
//! behavior are left to the caller: [`FlagSet::parse`] returns clap's error.

use std::ffi::OsString;
use std::path::Path;

use clap::{Arg, ArgMatches, Command};

use crate::coerce;
use crate::error::VenomError;
use crate::types::Value;

/// What to register for one flag.
#[derive(Debug, Clone, Copy)]
pub struct FlagSpec<'a> {
    pub long: &'a str,
    pub short: Option<char>,
    pub default: &'a Value,
    pub help: &'a str,
}

/// Handle to a registered flag, used to bind it to a store key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagHandle {
    id: String,
}

impl FlagHandle {
    /// The clap argument id, which is the flag's long name.
    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone)]
pub struct FlagSet {
    name: String,
    args: Vec<Arg>,
}

impl FlagSet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            args: Vec::new(),
        }
    }

    /// Name the flag set after the base name of `args[0]`.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, VenomError> {
        let first = args.first().ok_or(VenomError::MissingProgramName)?.as_ref();
        let name = Path::new(first)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(first);
        Ok(Self::new(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Register a typed flag. The kind comes from the default value.
    ///
    /// Duplicate names are not checked here; clap's own assertions apply
    /// when the command is built.
    pub fn register(&mut self, spec: FlagSpec<'_>) -> FlagHandle {
        let entry = coerce::entry(spec.default.kind());
        let mut arg = Arg::new(spec.long.to_string())
            .long(spec.long.to_string())
            .value_parser(entry.parse)
            .help(spec.help.to_string());
        if let Some(short) = spec.short {
            arg = arg.short(short);
        }
        let rendered = spec.default.to_string();
        if !rendered.is_empty() {
            arg = arg.default_value(rendered);
        }
        self.args.push((entry.configure)(arg));

        FlagHandle {
            id: spec.long.to_string(),
        }
    }

    /// Find a registered flag by its long name.
    pub fn lookup(&self, long: &str) -> Option<FlagHandle> {
        self.args
            .iter()
            .find(|arg| arg.get_long() == Some(long))
            .map(|arg| FlagHandle {
                id: arg.get_id().as_str().to_string(),
            })
    }

    /// Build the clap command holding every registered flag.
    ///
    /// clap's built-in `-h`/`--help` is disabled so fields may claim those names.
    pub fn command(&self) -> Command {
        Command::new(self.name.clone())
            .disable_help_flag(true)
            .args(self.args.iter().cloned())
    }

    /// Parse an argument vector (including the program name) against the flags.
    pub fn parse<I, T>(&self, argv: I) -> Result<ArgMatches, VenomError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(self.command().try_get_matches_from(argv)?)
    }
}
