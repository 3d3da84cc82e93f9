//! Unavailable-combination rules.
//!
//! An [`ExclusionRule`] is a triple of [`Pattern`]s. A selection is
//! unavailable when any rule of the active [`RuleSet`] matches all three of
//! its components. Rule sets are immutable once built; the [`RuleStore`]
//! swaps whole sets so readers never observe a half-replaced set.

mod persist;
mod store;

pub use persist::{Loaded, load_rules, save_rules};
pub use store::RuleStore;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Selection};
use crate::common::Result;

/// Textual form of the wildcard pattern.
pub const WILDCARD: &str = "*";

/// A single rule field: a wildcard or a literal category value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Pattern {
    /// Matches every value of the axis
    Any,
    /// Matches exactly this value
    Exact(String),
}

impl Pattern {
    /// Literal pattern.
    #[inline]
    pub fn exact(value: impl Into<String>) -> Self {
        Pattern::Exact(value.into())
    }

    /// Parse the textual form, where `*` is the wildcard.
    pub fn parse(text: &str) -> Self {
        if text == WILDCARD {
            Pattern::Any
        } else {
            Pattern::Exact(text.to_string())
        }
    }

    /// Check whether `value` satisfies this pattern.
    #[inline]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Pattern::Any => true,
            Pattern::Exact(expected) => expected == value,
        }
    }

    /// Textual form of the pattern.
    pub fn as_str(&self) -> &str {
        match self {
            Pattern::Any => WILDCARD,
            Pattern::Exact(value) => value,
        }
    }

    #[inline]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Pattern::Any)
    }
}

impl From<String> for Pattern {
    fn from(text: String) -> Self {
        if text == WILDCARD {
            Pattern::Any
        } else {
            Pattern::Exact(text)
        }
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        match pattern {
            Pattern::Any => WILDCARD.to_string(),
            Pattern::Exact(value) => value,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A combination that must not be offered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExclusionRule {
    pub level: Pattern,
    pub leistung: Pattern,
    pub disziplin: Pattern,
}

impl ExclusionRule {
    pub fn new(level: Pattern, leistung: Pattern, disziplin: Pattern) -> Self {
        Self {
            level,
            leistung,
            disziplin,
        }
    }

    /// Rule excluding a Leistung/Disziplin pair on every level.
    pub fn any_level(leistung: impl Into<String>, disziplin: impl Into<String>) -> Self {
        Self::new(Pattern::Any, Pattern::exact(leistung), Pattern::exact(disziplin))
    }

    /// Check whether all three patterns accept the triple.
    #[inline]
    pub fn matches(&self, level: &str, leistung: &str, disziplin: &str) -> bool {
        self.level.matches(level) && self.leistung.matches(leistung) && self.disziplin.matches(disziplin)
    }

    /// Whether every literal in this rule is a current option of its axis.
    pub fn is_known_to(&self, catalog: &Catalog) -> bool {
        use crate::catalog::Axis;

        [
            (Axis::Level, &self.level),
            (Axis::Leistung, &self.leistung),
            (Axis::Disziplin, &self.disziplin),
        ]
        .into_iter()
        .all(|(axis, pattern)| match pattern {
            Pattern::Any => true,
            Pattern::Exact(value) => catalog.contains(axis, value),
        })
    }
}

impl fmt::Display for ExclusionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.level, self.leistung, self.disziplin)
    }
}

/// An ordered, duplicate-free collection of exclusion rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<ExclusionRule>,
}

impl RuleSet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule unless an equal rule is already present.
    ///
    /// Returns `true` if the rule was added.
    pub fn insert(&mut self, rule: ExclusionRule) -> bool {
        if self.rules.contains(&rule) {
            return false;
        }
        self.rules.push(rule);
        true
    }

    /// Drop every rule for which `keep` returns `false`.
    pub fn retain(&mut self, keep: impl FnMut(&ExclusionRule) -> bool) {
        self.rules.retain(keep);
    }

    /// True iff at least one rule matches the triple.
    ///
    /// Values are not validated; use [`RuleSet::check`] for category input.
    pub fn is_unavailable(&self, level: &str, leistung: &str, disziplin: &str) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.matches(level, leistung, disziplin))
    }

    /// Validate the triple against `catalog`, then evaluate it.
    pub fn check(&self, catalog: &Catalog, level: &str, leistung: &str, disziplin: &str) -> Result<bool> {
        let selection = catalog.select(level, leistung, disziplin)?;
        Ok(self.excludes(&selection))
    }

    /// Evaluate an already validated selection.
    #[inline]
    pub fn excludes(&self, selection: &Selection<'_>) -> bool {
        self.is_unavailable(selection.level, selection.leistung, selection.disziplin)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExclusionRule> {
        self.rules.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules as an unordered set, for order-independent comparison.
    pub fn as_set(&self) -> HashSet<&ExclusionRule> {
        self.rules.iter().collect()
    }
}

impl FromIterator<ExclusionRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = ExclusionRule>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for rule in iter {
            set.insert(rule);
        }
        set
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a ExclusionRule;
    type IntoIter = std::slice::Iter<'a, ExclusionRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl IntoIterator for RuleSet {
    type Item = ExclusionRule;
    type IntoIter = std::vec::IntoIter<ExclusionRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}
