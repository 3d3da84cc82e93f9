//! Spreadsheet rule import.
//!
//! A rule workbook may carry two sheets, each optional:
//!
//! - `Liste`: a table whose header row names the columns `Leistung`,
//!   `Disziplin` and `Status`. Every row with status `nicht verfügbar`
//!   excludes its Leistung/Disziplin pair.
//! - `Matrix`: a cross table with Disziplin labels along the first row and
//!   Leistung labels down the first column. A cell excludes its pair when it
//!   holds an `x` or carries a colored solid fill.
//!
//! Both sources add to one rule set. Every imported rule applies to all
//! levels; pairs that name values outside the catalog are dropped.

mod grid;
mod list;


pub use grid::fill_marks;

use crate::catalog::Catalog;
use crate::common::Result;
use crate::ooxml::xlsx::Workbook;
use crate::rules::RuleSet;

/// Name of the list sheet.
pub const LIST_SHEET: &str = "Liste";

/// Name of the cross-table sheet.
pub const GRID_SHEET: &str = "Matrix";

/// Status value marking a list row as excluded (compared case-insensitively).
pub const UNAVAILABLE_STATUS: &str = "nicht verfügbar";

/// Parse the rule workbook in `bytes`.
///
/// Fails if the bytes are not a readable .xlsx workbook or the list sheet
/// lacks a required header. A workbook with neither sheet yields no rules.
pub fn parse_rules(bytes: &[u8], catalog: &Catalog) -> Result<RuleSet> {
    let workbook = Workbook::from_bytes(bytes)?;
    let mut rules = RuleSet::new();

    if let Some(sheet) = workbook.worksheet(LIST_SHEET)? {
        let added = list::collect(&sheet, &mut rules)?;
        tracing::debug!(sheet = LIST_SHEET, added, "collected list rules");
    }

    if let Some(sheet) = workbook.worksheet(GRID_SHEET)? {
        let added = grid::collect(&workbook, &sheet, &mut rules);
        tracing::debug!(sheet = GRID_SHEET, added, "collected grid rules");
    }

    let collected = rules.len();
    rules.retain(|rule| rule.is_known_to(catalog));
    if rules.len() < collected {
        tracing::debug!(dropped = collected - rules.len(), "dropped rules with unknown categories");
    }

    Ok(rules)
}

/// Cell text as used for labels and values: trimmed.
fn cell_text(sheet: &crate::ooxml::xlsx::Worksheet, row: u32, col: u32) -> String {
    sheet.text(row, col).trim().to_string()
}
