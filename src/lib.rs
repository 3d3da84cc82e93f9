//! Jobslot - job-title composer for a three-wheel slot selector
//!
//! A selection consists of a Level (seniority), a Leistung (service area)
//! and a Disziplin (discipline). This crate turns such a triple into a
//! gender-inclusive German job title and decides, through a set of exclusion
//! rules, whether the combination is offered at all.
//!
//! # Features
//!
//! - **Title composition**: regular `<Leistung>-<Rolle>` compounds plus a
//!   decision table for irregular German compounds
//! - **Rule engine**: exclusion triples with `*` wildcards on any axis
//! - **Spreadsheet import**: rules from a `Liste` table and a `Matrix` cross
//!   table of an .xlsx workbook, including cells marked only by fill color
//! - **Persistence**: the active rules as a YAML file that survives restarts
//! - **Spinning**: random wheel landing through any `rand` generator
//!
//! # Example - Composing a title
//!
//! ```rust
//! use jobslot::{Catalog, compose_title};
//!
//! let catalog = Catalog::standard();
//! assert_eq!(compose_title(&catalog, "Junior", "Social Media", "Text")?, "Junior Social-Media-Texter:in");
//! assert_eq!(compose_title(&catalog, "Mid-Level", "Presse/PR", "Beratung")?, "PR-Berater:in");
//! # Ok::<(), jobslot::Error>(())
//! ```
//!
//! # Example - Importing rules
//!
//! ```rust,no_run
//! use jobslot::{Config, Selector};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env();
//! let selector = Selector::bootstrap(&config);
//!
//! let imported = selector.import_spreadsheet(&std::fs::read("regeln.xlsx")?)?;
//! println!("{imported} rules imported");
//! selector.save_to(config.rules_path())?;
//!
//! println!("{}", selector.evaluate("Senior", "Web", "Analyse")?);
//! # Ok(())
//! # }
//! ```

/// Category schema and wheel positions
pub mod catalog;

/// Error type and runtime configuration
pub mod common;

/// Rule import from .xlsx workbooks
pub mod import;

/// OOXML (Office Open XML) spreadsheet reader
///
/// Provides the subset of SpreadsheetML needed by the importer.
pub mod ooxml;

/// Exclusion rules, the active rule store and the rule file
pub mod rules;

/// Session facade evaluating selections against the active rules
pub mod selector;

/// German job-title composition
pub mod title;

// Re-export commonly used types for convenience
pub use catalog::{Axis, Catalog, Selection, Wheels};
pub use common::{Config, Error, Result};
pub use import::parse_rules;
pub use rules::{ExclusionRule, Loaded, Pattern, RuleSet, RuleStore, load_rules, save_rules};
pub use selector::{Outcome, Selector, UNAVAILABLE_MARKER};
pub use title::compose_title;
