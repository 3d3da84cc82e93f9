//! Excel workbook package.
//!
//! Opens the ZIP container, reads the workbook-level parts once and parses
//! worksheets on demand by name.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{Cursor, Read};

use zip::ZipArchive;
use zip::result::ZipError;

use super::shared_strings::SharedStrings;
use super::styles::{Fill, Styles};
use super::workbook_parser::{self, SheetEntry};
use super::worksheet::{Cell, Worksheet};
use crate::common::{Error, Result};

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";
const STYLES_PART: &str = "xl/styles.xml";

/// An opened .xlsx workbook.
pub struct Workbook<'a> {
    archive: RefCell<ZipArchive<Cursor<&'a [u8]>>>,
    sheets: Vec<SheetEntry>,
    targets: HashMap<String, String>,
    shared_strings: SharedStrings,
    styles: Styles,
}

impl std::fmt::Debug for Workbook<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbook")
            .field("sheets", &self.sheets)
            .field("shared_strings", &self.shared_strings.len())
            .field("styles", &self.styles)
            .finish()
    }
}

impl<'a> Workbook<'a> {
    /// Open a workbook from the raw bytes of an .xlsx file.
    ///
    /// Fails with [`Error::Zip`] if the bytes are not a ZIP archive and with
    /// [`Error::InvalidFormat`] if the archive has no workbook part.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let workbook_xml = read_part(&mut archive, WORKBOOK_PART)?
            .ok_or_else(|| Error::InvalidFormat("not a spreadsheet: xl/workbook.xml is missing".to_string()))?;
        let sheets = workbook_parser::parse_workbook_xml(&workbook_xml)?;

        let targets = match read_part(&mut archive, WORKBOOK_RELS_PART)? {
            Some(rels) => workbook_parser::parse_relationships(&rels)?,
            None => HashMap::new(),
        };

        let shared_strings = match read_part(&mut archive, SHARED_STRINGS_PART)? {
            Some(xml) => SharedStrings::parse(&xml)?,
            None => SharedStrings::new(),
        };

        let styles = match read_part(&mut archive, STYLES_PART)? {
            Some(xml) => Styles::parse(&xml)?,
            None => Styles::new(),
        };

        Ok(Self {
            archive: RefCell::new(archive),
            sheets,
            targets,
            shared_strings,
            styles,
        })
    }

    /// Sheet names in tab order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }

    /// Whether a sheet with exactly this name exists.
    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheets.iter().any(|sheet| sheet.name == name)
    }

    /// Parse the worksheet called `name`.
    ///
    /// Returns `Ok(None)` if the workbook has no such sheet.
    pub fn worksheet(&self, name: &str) -> Result<Option<Worksheet>> {
        let Some(position) = self.sheets.iter().position(|sheet| sheet.name == name) else {
            return Ok(None);
        };

        let part = self.sheet_part(position);
        let content = read_part(&mut self.archive.borrow_mut(), &part)?
            .ok_or_else(|| Error::InvalidFormat(format!("worksheet part {} of sheet '{}' is missing", part, name)))?;

        Worksheet::parse(name, &content, &self.shared_strings).map(Some)
    }

    /// Fill applied to `cell` through its style, if any.
    pub fn cell_fill(&self, cell: &Cell) -> Option<&Fill> {
        self.styles.cell_fill(cell.style?)
    }

    fn sheet_part(&self, position: usize) -> String {
        self.sheets[position]
            .relationship_id
            .as_ref()
            .and_then(|id| self.targets.get(id))
            .map(|target| workbook_parser::resolve_target(target))
            .unwrap_or_else(|| format!("xl/worksheets/sheet{}.xml", position + 1))
    }
}

/// Read a package part as UTF-8 text, `None` if the part does not exist.
fn read_part(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut content = String::new();
    file.read_to_string(&mut content)?;

    match content.strip_prefix('\u{feff}') {
        Some(stripped) => Ok(Some(stripped.to_string())),
        None => Ok(Some(content)),
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixture::{Fixture, styles_with_fills};
    use super::super::styles::Color;
    use super::*;
    use crate::ooxml::xlsx::CellValue;

    #[test]
    fn opens_sheets_by_name() {
        let bytes = Fixture::new()
            .sheet("Liste", &[&["Leistung", "Disziplin"], &["Web", "Text"]])
            .sheet("Matrix", &[&["", "Design"]])
            .build();

        let workbook = Workbook::from_bytes(&bytes).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Liste", "Matrix"]);
        assert!(workbook.has_sheet("Matrix"));
        assert!(!workbook.has_sheet("matrix"));

        let liste = workbook.worksheet("Liste").unwrap().unwrap();
        assert_eq!(liste.text(2, 1), "Web");
        assert!(workbook.worksheet("Archiv").unwrap().is_none());
    }

    #[test]
    fn resolves_shared_strings() {
        let bytes = Fixture::new()
            .shared_strings(&["Leistung", "Audio"])
            .raw_sheet(
                "Liste",
                r#"<worksheet><sheetData><row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row></sheetData></worksheet>"#,
            )
            .build();

        let workbook = Workbook::from_bytes(&bytes).unwrap();
        let sheet = workbook.worksheet("Liste").unwrap().unwrap();
        assert_eq!(sheet.cell(1, 2).unwrap().value, CellValue::Text("Audio".into()));
    }

    #[test]
    fn exposes_cell_fills() {
        let bytes = Fixture::new()
            .styles(styles_with_fills(&[
                r#"<patternFill patternType="solid"><fgColor rgb="FFFFFF00"/></patternFill>"#,
            ]))
            .sheet("Matrix", &[&["", "@1"]])
            .build();

        let workbook = Workbook::from_bytes(&bytes).unwrap();
        let sheet = workbook.worksheet("Matrix").unwrap().unwrap();
        let cell = sheet.cell(1, 2).unwrap();
        assert_eq!(
            workbook.cell_fill(cell).and_then(Fill::fg_color),
            Some(&Color::Rgb("FFFFFF00".into()))
        );
    }

    #[test]
    fn rejects_non_zip_bytes() {
        assert!(matches!(
            Workbook::from_bytes(b"Leistung;Disziplin;Status"),
            Err(Error::Zip(_))
        ));
    }

    #[test]
    fn rejects_zip_without_workbook() {
        let bytes = Fixture::archive(&[("word/document.xml", "<document/>")]);
        assert!(matches!(
            Workbook::from_bytes(&bytes),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn missing_worksheet_part_is_an_error() {
        let bytes = Fixture::archive(&[(
            "xl/workbook.xml",
            r#"<workbook><sheets><sheet name="Liste" sheetId="1"/></sheets></workbook>"#,
        )]);
        let workbook = Workbook::from_bytes(&bytes).unwrap();
        assert!(matches!(workbook.worksheet("Liste"), Err(Error::InvalidFormat(_))));
    }
}
