//! Cell fills from xl/styles.xml.
//!
//! Only the parts needed to answer "which fill does this cell carry" are
//! read: the `fills` table and the `cellXfs` records that reference it.
//!
//! # Example
//!
//! ```rust
//! use jobslot::ooxml::xlsx::{Color, Styles};
//!
//! let xml = r#"<styleSheet>
//!   <fills count="1"><fill><patternFill patternType="solid"><fgColor rgb="FFFF0000"/></patternFill></fill></fills>
//!   <cellXfs count="1"><xf fillId="0"/></cellXfs>
//! </styleSheet>"#;
//! let styles = Styles::parse(xml)?;
//! assert_eq!(styles.cell_fill(0).and_then(|f| f.fg_color()), Some(&Color::Rgb("FFFF0000".into())));
//! # Ok::<(), jobslot::Error>(())
//! ```

mod fill;
mod parser;

pub use fill::{Color, Fill};
pub(crate) use parser::attribute;

use crate::common::Result;

/// Cell format record (one entry of `cellXfs`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellFormat {
    /// Fill ID (index into fills array)
    pub fill_id: Option<u32>,
}

/// Fill-related styles of a workbook.
#[derive(Debug, Default)]
pub struct Styles {
    /// Fill patterns and colors
    pub fills: Vec<Fill>,
    /// Cell format records referenced by the `s` attribute of cells
    pub cell_xfs: Vec<CellFormat>,
}

impl Styles {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse styles from xl/styles.xml content.
    pub fn parse(content: &str) -> Result<Self> {
        parser::parse_styles(content)
    }

    /// Get a fill by ID (index).
    #[inline]
    pub fn get_fill(&self, id: usize) -> Option<&Fill> {
        self.fills.get(id)
    }

    /// Fill applied through the cell format at `style_index`.
    pub fn cell_fill(&self, style_index: u32) -> Option<&Fill> {
        let format = self.cell_xfs.get(style_index as usize)?;
        self.get_fill(format.fill_id? as usize)
    }
}
