//! Rule file persistence.
//!
//! The rule file is a YAML sequence of `{ level, leistung, disziplin }`
//! records with `*` as the wildcard:
//!
//! ```yaml
//! - level: '*'
//!   leistung: Web
//!   disziplin: Analyse
//! ```
//!
//! Loading is tolerant. A missing file means no rules yet, a corrupt file is
//! replaced by an empty set plus a warning, and records that no longer fit the
//! catalog are dropped.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ExclusionRule, Pattern, RuleSet};
use crate::catalog::{Axis, Catalog};
use crate::common::{Error, Result};

/// Result of [`load_rules`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loaded {
    /// The rules that passed validation
    pub rules: RuleSet,
    /// Set when the file existed but could not be read or parsed
    pub warning: Option<String>,
}

#[derive(Serialize)]
struct StoredRule<'a> {
    level: &'a str,
    leistung: &'a str,
    disziplin: &'a str,
}

#[derive(Deserialize)]
struct RawRule {
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    leistung: Option<String>,
    #[serde(default)]
    disziplin: Option<String>,
}

impl RawRule {
    /// Convert to a rule if every field is present and valid for `catalog`.
    fn validate(self, catalog: &Catalog) -> Option<ExclusionRule> {
        let level = Pattern::from(self.level?);
        if let Pattern::Exact(value) = &level
            && !catalog.contains(Axis::Level, value)
        {
            return None;
        }

        let leistung = self.leistung?;
        let disziplin = self.disziplin?;
        if !catalog.contains(Axis::Leistung, &leistung) || !catalog.contains(Axis::Disziplin, &disziplin) {
            return None;
        }

        Some(ExclusionRule::new(level, Pattern::Exact(leistung), Pattern::Exact(disziplin)))
    }
}

/// Load the rule file at `path`.
///
/// Never fails: problems with the file surface as [`Loaded::warning`] and an
/// empty rule set. Records with unknown values are discarded silently.
pub fn load_rules(path: impl AsRef<Path>, catalog: &Catalog) -> Loaded {
    let path = path.as_ref();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no rule file yet");
            return Loaded::default();
        },
        Err(e) => return corrupt(path, format!("cannot read rule file: {e}")),
    };

    if content.trim().is_empty() {
        return Loaded::default();
    }

    let records: Vec<RawRule> = match serde_saphyr::from_str(&content) {
        Ok(records) => records,
        Err(e) => return corrupt(path, format!("rule file is not a valid rule list: {e}")),
    };

    let total = records.len();
    let rules: RuleSet = records
        .into_iter()
        .filter_map(|record| record.validate(catalog))
        .collect();

    tracing::debug!(
        path = %path.display(),
        loaded = rules.len(),
        discarded = total - rules.len(),
        "loaded rule file"
    );

    Loaded {
        rules,
        warning: None,
    }
}

fn corrupt(path: &Path, message: String) -> Loaded {
    tracing::warn!(path = %path.display(), "{message}; starting without rules");
    Loaded {
        rules: RuleSet::new(),
        warning: Some(message),
    }
}

/// Write `rules` to `path`, creating missing parent directories.
///
/// Returns the path written. The in-memory set is untouched on failure.
pub fn save_rules(rules: &RuleSet, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();

    let records: Vec<StoredRule<'_>> = rules
        .iter()
        .map(|rule| StoredRule {
            level: rule.level.as_str(),
            leistung: rule.leistung.as_str(),
            disziplin: rule.disziplin.as_str(),
        })
        .collect();

    let yaml = serde_saphyr::to_string(&records)
        .map_err(|e| Error::Persist(format!("Failed to serialize rules to YAML: {}", e)))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, yaml)?;

    tracing::info!(path = %path.display(), rules = rules.len(), "saved rule file");
    Ok(path.to_path_buf())
}
