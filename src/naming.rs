//! Derive long-flag and environment variable names from field identifiers.

use crate::tokenize;
use crate::types::ProcessingOptions;

/// Separators used when joining the words of an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    pub long_separator: String,
    pub env_separator: String,
}

impl Default for Naming {
    fn default() -> Self {
        Self {
            long_separator: "_".to_string(),
            env_separator: "_".to_string(),
        }
    }
}

/// Names produced for one field. `None` means no binding of that kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedNames {
    pub long: Option<String>,
    pub env: Option<String>,
}

impl Naming {
    /// Resolve the long flag and environment name for `field`.
    ///
    /// Explicit values are used verbatim. Otherwise a name is derived only when
    /// the matching option bit is set. The identifier is tokenized at most once.
    pub fn derive(
        &self,
        field: &str,
        explicit_long: Option<&str>,
        explicit_env: Option<&str>,
        options: ProcessingOptions,
    ) -> DerivedNames {
        let needs_long = explicit_long.is_none() && options.contains(ProcessingOptions::WITH_FLAG);
        let needs_env = explicit_env.is_none() && options.contains(ProcessingOptions::WITH_ENV);
        let words = if needs_long || needs_env {
            tokenize::split_words(field)
        } else {
            Vec::new()
        };

        let long = match explicit_long {
            Some(long) => Some(long.to_string()),
            None if needs_long => Some(words.join(&self.long_separator).to_lowercase()),
            None => None,
        };
        let env = match explicit_env {
            Some(env) => Some(env.to_string()),
            None if needs_env => Some(words.join(&self.env_separator).to_uppercase()),
            None => None,
        };

        DerivedNames { long, env }
    }
}

/// Qualify an environment variable name with `prefix`.
///
/// Names not already starting with the prefix become `PREFIX_NAME`; the result
/// is upper-cased as a whole either way. An empty prefix adds nothing.
pub fn qualify_env(prefix: &str, name: &str) -> String {
    if name.starts_with(prefix) {
        name.to_uppercase()
    } else {
        format!("{prefix}_{name}").to_uppercase()
    }
}
