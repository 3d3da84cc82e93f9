//! Session facade tying the catalog, the active rules and persistence together.
//!
//! # Example
//!
//! ```rust
//! use jobslot::{ExclusionRule, Outcome, RuleSet, Selector};
//!
//! let selector = Selector::default();
//! selector.replace_rules([ExclusionRule::any_level("Web", "Analyse")].into_iter().collect::<RuleSet>());
//!
//! assert_eq!(
//!     selector.evaluate("Senior", "Web", "Design")?.to_string(),
//!     "Senior Web-Designer:in"
//! );
//! assert_eq!(selector.evaluate("Junior", "Web", "Analyse")?, Outcome::Unavailable);
//! # Ok::<(), jobslot::Error>(())
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::{Catalog, Selection, Wheels};
use crate::common::{Config, Result};
use crate::import::parse_rules;
use crate::rules::{RuleSet, RuleStore, load_rules, save_rules};
use crate::title::render;

/// Text shown in place of a title for an excluded combination.
pub const UNAVAILABLE_MARKER: &str = "nicht verfügbar";

/// Result of evaluating a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The combination is available and carries this title
    Title(String),
    /// An exclusion rule matches the combination
    Unavailable,
}

impl Outcome {
    #[inline]
    pub fn is_available(&self) -> bool {
        matches!(self, Outcome::Title(_))
    }

    /// The title, if the combination is available.
    pub fn title(&self) -> Option<&str> {
        match self {
            Outcome::Title(title) => Some(title),
            Outcome::Unavailable => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Title(title) => f.write_str(title),
            Outcome::Unavailable => f.write_str(UNAVAILABLE_MARKER),
        }
    }
}

/// A selector session.
///
/// Evaluation reads a snapshot of the active rule set, so an import or load
/// running on another thread never yields a half-replaced set.
#[derive(Debug, Default)]
pub struct Selector {
    catalog: Catalog,
    store: RuleStore,
}

impl Selector {
    /// Session over `catalog` starting with `rules`.
    pub fn new(catalog: Catalog, rules: RuleSet) -> Self {
        Self {
            catalog,
            store: RuleStore::new(rules),
        }
    }

    /// Session over the standard catalog with the rules stored at the
    /// configured location.
    ///
    /// A missing rule file starts the session without rules. A corrupt one
    /// does too, after logging a warning.
    pub fn bootstrap(config: &Config) -> Self {
        let selector = Self::default();
        selector.load_from(config.rules_path());
        selector
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Snapshot of the active rule set.
    #[inline]
    pub fn rules(&self) -> Arc<RuleSet> {
        self.store.snapshot()
    }

    /// Replace the active rule set and return the previous one.
    pub fn replace_rules(&self, rules: RuleSet) -> Arc<RuleSet> {
        tracing::info!(rules = rules.len(), "replacing active rule set");
        self.store.replace(rules)
    }

    /// Title or unavailability of a triple.
    ///
    /// Values outside the catalog fail with
    /// [`Error::InvalidArgument`](crate::Error::InvalidArgument).
    pub fn evaluate(&self, level: &str, leistung: &str, disziplin: &str) -> Result<Outcome> {
        let selection = self.catalog.select(level, leistung, disziplin)?;
        Ok(self.outcome(&selection))
    }

    /// Evaluate the triple the wheels currently point at.
    pub fn evaluate_wheels(&self, wheels: &Wheels) -> Result<Outcome> {
        let selection = wheels.selection(&self.catalog)?;
        Ok(self.outcome(&selection))
    }

    fn outcome(&self, selection: &Selection<'_>) -> Outcome {
        if self.store.snapshot().excludes(selection) {
            Outcome::Unavailable
        } else {
            Outcome::Title(render(selection))
        }
    }

    /// Whether any active rule excludes the triple.
    pub fn is_unavailable(&self, level: &str, leistung: &str, disziplin: &str) -> Result<bool> {
        self.store.snapshot().check(&self.catalog, level, leistung, disziplin)
    }

    /// Title of a triple regardless of the active rules.
    pub fn compose_title(&self, level: &str, leistung: &str, disziplin: &str) -> Result<String> {
        crate::title::compose_title(&self.catalog, level, leistung, disziplin)
    }

    /// Replace the active rules with those of a rule workbook.
    ///
    /// Returns the number of imported rules. On error the active set is left
    /// untouched.
    pub fn import_spreadsheet(&self, bytes: &[u8]) -> Result<usize> {
        let rules = parse_rules(bytes, &self.catalog)?;
        let count = rules.len();
        self.replace_rules(rules);
        Ok(count)
    }

    /// Replace the active rules with those stored at `path`.
    ///
    /// Returns the load warning, if the file existed but could not be used.
    pub fn load_from(&self, path: impl AsRef<Path>) -> Option<String> {
        let loaded = load_rules(path, &self.catalog);
        self.replace_rules(loaded.rules);
        loaded.warning
    }

    /// Write the active rules to `path`.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        save_rules(&self.store.snapshot(), path)
    }
}
