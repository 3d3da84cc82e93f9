//! Excel (.xlsx) spreadsheet reading.
//!
//! A read-only view of an Office Open XML workbook: sheet list, cell values
//! (shared, inline and formula strings, numbers, booleans, errors) and the
//! fill each cell carries through its style.
//!
//! - `Workbook`: the opened package, hands out worksheets by name
//! - `Worksheet`: sparse cell grid of one sheet
//! - `Styles`: fills and cell formats from styles.xml
//! - `SharedStrings`: the shared string table
//!
//! # Example
//!
//! ```rust,no_run
//! use jobslot::ooxml::xlsx::Workbook;
//!
//! let bytes = std::fs::read("regeln.xlsx")?;
//! let workbook = Workbook::from_bytes(&bytes)?;
//! for name in workbook.sheet_names() {
//!     println!("Sheet: {}", name);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod shared_strings;
mod styles;
mod workbook;
mod workbook_parser;
mod worksheet;

#[cfg(test)]
pub(crate) mod fixture;

pub use shared_strings::SharedStrings;
pub use styles::{CellFormat, Color, Fill, Styles};
pub use workbook::Workbook;
pub use workbook_parser::SheetEntry;
pub use worksheet::{Cell, CellValue, Worksheet, reference_to_coords};
