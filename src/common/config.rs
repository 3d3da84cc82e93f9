//! Runtime configuration.
//!
//! Holds the location of the persisted rule file. The path can be overridden
//! through the environment so deployments can keep rules outside the working
//! directory.

use std::path::{Path, PathBuf};

/// Environment variable overriding the rule file location.
pub const RULES_FILE_ENV: &str = "JOBSLOT_RULES_FILE";

/// Rule file location used when the environment does not override it.
pub const DEFAULT_RULES_PATH: &str = "data/unavailable_rules.yaml";

/// Configuration for a selector session.
///
/// # Examples
///
/// ```rust
/// use jobslot::Config;
///
/// let config = Config::default().with_rules_path("/tmp/rules.yaml");
/// assert_eq!(config.rules_path().to_str(), Some("/tmp/rules.yaml"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    rules_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules_path: PathBuf::from(DEFAULT_RULES_PATH),
        }
    }
}

impl Config {
    /// Build a configuration from the process environment.
    ///
    /// An unset or empty `JOBSLOT_RULES_FILE` falls back to [`DEFAULT_RULES_PATH`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(RULES_FILE_ENV) {
            Some(path) if !path.trim().is_empty() => Self {
                rules_path: PathBuf::from(path.trim()),
            },
            _ => Self::default(),
        }
    }

    /// Set the rule file location.
    #[inline]
    pub fn with_rules_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rules_path = path.into();
        self
    }

    /// Location of the persisted rule file.
    #[inline]
    pub fn rules_path(&self) -> &Path {
        &self.rules_path
    }
}
