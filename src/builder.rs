use crate::bind::{self, FieldDescriptor};
use crate::coerce;
use crate::error::VenomError;
use crate::flags::FlagSet;
use crate::naming::Naming;
use crate::observer::{Observer, SkipReason, TracingObserver};
use crate::store::Store;
use crate::tags::{FieldTags, Spec};
use crate::types::{Kind, ProcessingOptions};
use crate::walk;

/// Entry point for binding a configuration struct.
pub struct Venom;

impl Venom {
    pub fn builder() -> VenomBuilder {
        VenomBuilder::new()
    }
}

/// Builder holding everything a binding pass needs besides the struct itself.
///
/// - **Prefix**: [`prefix()`](Self::prefix) qualifies environment variable names.
/// - **Options**: [`options()`](Self::options) turns derived flag and env names on or off.
/// - **Naming**: [`long_separator()`](Self::long_separator) and
///   [`env_separator()`](Self::env_separator) join the words of derived names.
/// - **Observer**: [`observer()`](Self::observer) receives per-field progress.
pub struct VenomBuilder {
    prefix: String,
    options: ProcessingOptions,
    naming: Naming,
    observer: Box<dyn Observer>,
}

impl Default for VenomBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VenomBuilder {
    fn new() -> Self {
        Self {
            prefix: String::new(),
            options: ProcessingOptions::DEFAULT,
            naming: Naming::default(),
            observer: Box::new(TracingObserver),
        }
    }

    /// Set the environment variable prefix (default: none).
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    /// Set which names are derived for untagged fields (default: both).
    pub fn options(mut self, options: ProcessingOptions) -> Self {
        self.options = options;
        self
    }

    /// Separator between words of derived long flag names (default: `"_"`).
    pub fn long_separator(mut self, separator: &str) -> Self {
        self.naming.long_separator = separator.to_string();
        self
    }

    /// Separator between words of derived env names (default: `"_"`).
    pub fn env_separator(mut self, separator: &str) -> Self {
        self.naming.env_separator = separator.to_string();
        self
    }

    /// Replace the default [`TracingObserver`].
    pub fn observer(mut self, observer: impl Observer + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Create a flag set named after `args[0]` and bind every field of `spec` into it.
    ///
    /// Nothing is registered when `spec` is not a struct. The returned flag set
    /// has not parsed anything yet; pass its matches to [`Store::apply_matches`].
    pub fn new_configuration<S, A>(
        &self,
        spec: &S,
        store: &mut Store,
        args: &[A],
    ) -> Result<FlagSet, VenomError>
    where
        S: Spec,
        A: AsRef<str>,
    {
        let mut flags = FlagSet::from_args(args)?;
        self.add_configuration(&mut flags, spec, store)?;
        Ok(flags)
    }

    /// Bind every field of `spec` into an existing flag set and store.
    ///
    /// Fields are processed in declaration order. The first failing field stops
    /// the pass; bindings made for earlier fields stay in place.
    pub fn add_configuration<S: Spec>(
        &self,
        flags: &mut FlagSet,
        spec: &S,
        store: &mut Store,
    ) -> Result<(), VenomError> {
        walk::walk_fields(spec, |name, kind| {
            self.process_field::<S>(name, kind, flags, store)
        })
    }

    fn process_field<S: Spec>(
        &self,
        name: &'static str,
        kind: Option<Kind>,
        flags: &mut FlagSet,
        store: &mut Store,
    ) -> Result<(), VenomError> {
        self.observer.field_started(name);

        let tags = FieldTags::resolve(&S::tags(name));
        if tags.ignored {
            self.observer.field_skipped(name, SkipReason::Ignored);
            return Ok(());
        }
        let Some(kind) = kind else {
            self.observer.field_skipped(name, SkipReason::Unsupported);
            return Ok(());
        };

        let names = self.naming.derive(name, tags.long, tags.env, self.options);
        // A short alias only exists alongside a long flag.
        let short = match names.long.as_deref() {
            Some(long) if !long.is_empty() => bind::short_flag(name, tags.short)?,
            _ => None,
        };
        let default_raw = tags.default.unwrap_or("");
        let mut field = FieldDescriptor {
            name,
            kind,
            long: names.long,
            short,
            env: names.env,
            help: tags.help.unwrap_or(""),
            default_raw,
            default: coerce::zero(kind),
        };
        self.observer.names_resolved(&field);

        field.default =
            coerce::coerce(kind, default_raw).map_err(|source| VenomError::Coercion {
                field: name.to_string(),
                value: default_raw.to_string(),
                source,
            })?;
        self.observer.default_resolved(&field);

        bind::bind(&field, &self.prefix, flags, store)
    }
}

/// Bind `spec` into a new flag set named after `args[0]`.
///
/// Shorthand for `Venom::builder().prefix(prefix).options(options).new_configuration(..)`.
pub fn new_configuration<S, A>(
    spec: &S,
    store: &mut Store,
    prefix: &str,
    options: ProcessingOptions,
    args: &[A],
) -> Result<FlagSet, VenomError>
where
    S: Spec,
    A: AsRef<str>,
{
    Venom::builder()
        .prefix(prefix)
        .options(options)
        .new_configuration(spec, store, args)
}

/// Bind `spec` into an existing flag set.
pub fn add_configuration<S: Spec>(
    flags: &mut FlagSet,
    spec: &S,
    store: &mut Store,
    prefix: &str,
    options: ProcessingOptions,
) -> Result<(), VenomError> {
    Venom::builder()
        .prefix(prefix)
        .options(options)
        .add_configuration(flags, spec, store)
}
