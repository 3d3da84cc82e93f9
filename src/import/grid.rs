//! The `Matrix` sheet: Leistung rows crossed with Disziplin columns.

use super::cell_text;
use crate::ooxml::xlsx::{Color, Fill, Workbook, Worksheet};
use crate::rules::{ExclusionRule, RuleSet};

/// Cell text that marks an exclusion, compared case-insensitively.
const MARK: &str = "x";

/// RGB digits of colors that never mark a cell.
const NEUTRAL_RGB: [&str; 2] = ["FFFFFF", "000000"];

/// Whether a cell fill marks an exclusion.
///
/// A solid fill marks when its foreground is an RGB color other than white
/// or black (black also covers the transparent default `00000000`). Theme
/// and indexed colors cannot be resolved without the palette and always
/// mark. Automatic colors, missing foregrounds, other patterns and gradients
/// never mark.
pub fn fill_marks(fill: &Fill) -> bool {
    if !fill.is_solid() {
        return false;
    }

    match fill.fg_color() {
        Some(color @ Color::Rgb(_)) => color
            .rgb_digits()
            .is_some_and(|rgb| !NEUTRAL_RGB.contains(&rgb.as_str())),
        Some(Color::Theme(_)) | Some(Color::Indexed(_)) => true,
        Some(Color::Auto) | None => false,
    }
}

/// Labels along one header axis with their positions, up to the first gap.
fn header_labels(mut label_at: impl FnMut(u32) -> String) -> Vec<(u32, String)> {
    (2u32..)
        .map(|position| (position, label_at(position)))
        .take_while(|(_, label)| !label.is_empty())
        .collect()
}

/// Add the marked pairs of the cross table to `rules`.
///
/// Returns the number of rules added.
pub(super) fn collect(workbook: &Workbook<'_>, sheet: &Worksheet, rules: &mut RuleSet) -> usize {
    let disziplinen = header_labels(|col| cell_text(sheet, 1, col));
    let leistungen = header_labels(|row| cell_text(sheet, row, 1));
    let mut added = 0;

    for (row, leistung) in &leistungen {
        for (col, disziplin) in &disziplinen {
            let Some(cell) = sheet.cell(*row, *col) else {
                continue;
            };

            let by_text = cell.value.to_string().trim().eq_ignore_ascii_case(MARK);
            let by_fill = workbook.cell_fill(cell).is_some_and(fill_marks);

            if (by_text || by_fill) && rules.insert(ExclusionRule::any_level(leistung.as_str(), disziplin.as_str())) {
                added += 1;
            }
        }
    }

    added
}
