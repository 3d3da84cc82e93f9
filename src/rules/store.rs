//! Shared holder of the active rule set.

use std::sync::Arc;

use parking_lot::RwLock;

use super::RuleSet;

/// The active rule set of a session.
///
/// Readers take an [`Arc`] snapshot and evaluate against it without holding
/// the lock. Replacement swaps the pointer under a short write lock, so a
/// reader sees either the old or the new set, never a mix.
#[derive(Debug, Default)]
pub struct RuleStore {
    current: RwLock<Arc<RuleSet>>,
}

impl RuleStore {
    /// Store starting with `rules`.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(rules)),
        }
    }

    /// The set active right now.
    #[inline]
    pub fn snapshot(&self) -> Arc<RuleSet> {
        Arc::clone(&self.current.read())
    }

    /// Replace the active set wholesale and return the previous one.
    pub fn replace(&self, rules: RuleSet) -> Arc<RuleSet> {
        let next = Arc::new(rules);
        std::mem::replace(&mut *self.current.write(), next)
    }
}
