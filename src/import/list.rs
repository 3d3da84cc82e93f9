//! The `Liste` sheet: one row per Leistung/Disziplin pair with a status.

use super::{UNAVAILABLE_STATUS, cell_text};
use crate::common::{Error, Result};
use crate::ooxml::xlsx::Worksheet;
use crate::rules::{ExclusionRule, RuleSet};

const LEISTUNG_HEADER: &str = "leistung";
const DISZIPLIN_HEADER: &str = "disziplin";
const STATUS_HEADER: &str = "status";

/// Column positions of the required headers.
struct Columns {
    leistung: u32,
    disziplin: u32,
    status: u32,
}

impl Columns {
    /// Locate the required labels in row 1.
    fn find(sheet: &Worksheet) -> Result<Self> {
        let max_col = sheet.max_col();
        let find = |label: &'static str| -> Result<u32> {
            (1..=max_col)
                .find(|&col| cell_text(sheet, 1, col).to_lowercase() == label)
                .ok_or_else(|| Error::MissingHeader {
                    sheet: sheet.name().to_string(),
                    label,
                })
        };

        Ok(Self {
            leistung: find(LEISTUNG_HEADER)?,
            disziplin: find(DISZIPLIN_HEADER)?,
            status: find(STATUS_HEADER)?,
        })
    }
}

/// Add the excluded pairs of the list sheet to `rules`.
///
/// Returns the number of rules added.
pub(super) fn collect(sheet: &Worksheet, rules: &mut RuleSet) -> Result<usize> {
    if sheet.is_empty() {
        return Ok(0);
    }

    let columns = Columns::find(sheet)?;
    let mut added = 0;

    for row in 2..=sheet.max_row() {
        if cell_text(sheet, row, columns.status).to_lowercase() != UNAVAILABLE_STATUS {
            continue;
        }

        let leistung = cell_text(sheet, row, columns.leistung);
        let disziplin = cell_text(sheet, row, columns.disziplin);
        if leistung.is_empty() || disziplin.is_empty() {
            continue;
        }

        if rules.insert(ExclusionRule::any_level(leistung, disziplin)) {
            added += 1;
        }
    }

    Ok(added)
}
