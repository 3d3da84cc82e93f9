//! Worksheet cell grid.
//!
//! A worksheet part (`xl/worksheets/sheetN.xml`) is streamed once and turned
//! into a sparse map of cells. Styled cells without a value are kept, since
//! their fill can carry meaning on its own.

use std::collections::BTreeMap;
use std::fmt;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::shared_strings::{SharedStrings, read_rich_text};
use super::styles::attribute;
use crate::common::{Error, Result};

/// Value of a single cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Error(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(text) => f.write_str(text),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
            CellValue::Error(code) => f.write_str(code),
        }
    }
}

/// A cell with its value and the index of its cell format.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    /// Index into `cellXfs`, if the cell has a style
    pub style: Option<u32>,
}

/// Parsed worksheet.
///
/// Rows and columns are 1-based, matching Excel references (`A1` is `(1, 1)`).
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    name: String,
    cells: BTreeMap<(u32, u32), Cell>,
}

impl Worksheet {
    /// Parse worksheet XML, resolving shared strings through `shared_strings`.
    pub fn parse(name: &str, content: &str, shared_strings: &SharedStrings) -> Result<Self> {
        let cells = parse_worksheet_xml(content, shared_strings)?;
        Ok(Self {
            name: name.to_string(),
            cells,
        })
    }

    /// Sheet name as listed in the workbook.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell at `(row, col)`.
    #[inline]
    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Display text of the cell at `(row, col)`, empty if absent.
    pub fn text(&self, row: u32, col: u32) -> String {
        self.cell(row, col)
            .map(|cell| cell.value.to_string())
            .unwrap_or_default()
    }

    /// Highest row index holding a cell, 0 for an empty sheet.
    pub fn max_row(&self) -> u32 {
        self.cells.keys().map(|&(row, _)| row).max().unwrap_or(0)
    }

    /// Highest column index holding a cell, 0 for an empty sheet.
    pub fn max_col(&self) -> u32 {
        self.cells.keys().map(|&(_, col)| col).max().unwrap_or(0)
    }

    /// Whether the sheet has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Attributes of a `<c>` element.
struct CellHead {
    col: Option<u32>,
    kind: Option<String>,
    style: Option<u32>,
}

fn parse_worksheet_xml(
    content: &str,
    shared_strings: &SharedStrings,
) -> Result<BTreeMap<(u32, u32), Cell>> {
    let mut reader = Reader::from_str(content);
    let mut cells = BTreeMap::new();
    let mut buf = Vec::with_capacity(1024);

    // Rows and cells may omit their reference; they then follow the previous one.
    let mut row = 0u32;
    let mut col = 0u32;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"row" => {
                row = match attribute(&reader, &e, b"r").and_then(|r| r.parse::<u32>().ok()) {
                    Some(r) => r,
                    None => next_index(row, "row")?,
                };
                col = 0;
            },
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"c" => {
                let head = cell_head(&reader, &e)?;
                col = match head.col {
                    Some(c) => c,
                    None => next_index(col, "column")?,
                };
                cells.insert(
                    (row, col),
                    Cell {
                        value: CellValue::Empty,
                        style: head.style,
                    },
                );
            },
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"c" => {
                let head = cell_head(&reader, &e)?;
                col = match head.col {
                    Some(c) => c,
                    None => next_index(col, "column")?,
                };
                let value = read_cell_value(&mut reader, head.kind.as_deref(), shared_strings)?;
                cells.insert(
                    (row, col),
                    Cell {
                        value,
                        style: head.style,
                    },
                );
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("XML error in worksheet: {}", e))),
            _ => {},
        }
    }

    Ok(cells)
}

/// Position following `current` for an element without its own reference.
fn next_index(current: u32, what: &str) -> Result<u32> {
    current
        .checked_add(1)
        .ok_or_else(|| Error::InvalidFormat(format!("{} index out of range", what)))
}

fn cell_head(reader: &Reader<&[u8]>, start: &BytesStart) -> Result<CellHead> {
    let col = match attribute(reader, start, b"r") {
        Some(reference) => Some(reference_to_coords(&reference)?.0),
        None => None,
    };

    Ok(CellHead {
        col,
        kind: attribute(reader, start, b"t"),
        style: attribute(reader, start, b"s").and_then(|s| s.parse::<u32>().ok()),
    })
}

/// Read the children of a `<c>` element and convert its value by cell type.
fn read_cell_value(
    reader: &mut Reader<&[u8]>,
    kind: Option<&str>,
    shared_strings: &SharedStrings,
) -> Result<CellValue> {
    let mut raw: Option<String> = None;
    let mut inline: Option<String> = None;
    let mut buf = Vec::with_capacity(128);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"v" => raw = Some(read_element_text(reader, b"v")?),
                b"is" => inline = Some(read_rich_text(reader, b"is")?),
                b"f" => {
                    read_element_text(reader, b"f")?;
                },
                _ => {},
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"c" => break,
            Ok(Event::Eof) => return Err(Error::Xml("unexpected end of worksheet inside <c>".to_string())),
            Err(e) => return Err(Error::Xml(format!("XML error in cell: {}", e))),
            _ => {},
        }
    }

    let value = match (kind, raw, inline) {
        (Some("inlineStr"), _, Some(text)) => CellValue::Text(text),
        (Some("s"), Some(index), _) => {
            let index = index
                .trim()
                .parse::<usize>()
                .map_err(|_| Error::InvalidFormat(format!("Invalid shared string index: {}", index)))?;
            let text = shared_strings
                .get(index)
                .ok_or_else(|| Error::InvalidFormat(format!("Shared string {} out of range", index)))?;
            CellValue::Text(text.to_string())
        },
        (Some("str"), Some(text), _) => CellValue::Text(text),
        (Some("b"), Some(v), _) => CellValue::Bool(v.trim() == "1"),
        (Some("e"), Some(code), _) => CellValue::Error(code),
        (_, Some(v), _) => match v.trim().parse::<f64>() {
            Ok(number) => CellValue::Number(number),
            Err(_) => CellValue::Text(v),
        },
        (_, None, Some(text)) => CellValue::Text(text),
        (_, None, None) => CellValue::Empty,
    };

    Ok(value)
}

/// Unescaped text content of a simple element up to its end tag.
fn read_element_text(reader: &mut Reader<&[u8]>, end: &[u8]) -> Result<String> {
    let mut raw = String::new();
    let mut buf = Vec::with_capacity(64);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => raw.push_str(std::str::from_utf8(&e)?),
            Ok(Event::GeneralRef(e)) => {
                raw.push('&');
                raw.push_str(std::str::from_utf8(&e)?);
                raw.push(';');
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == end => break,
            Ok(Event::Eof) => return Err(Error::Xml("unexpected end of worksheet".to_string())),
            Err(e) => return Err(Error::Xml(format!("XML error in cell value: {}", e))),
            _ => {},
        }
    }

    quick_xml::escape::unescape(&raw)
        .map(|text| text.into_owned())
        .map_err(|e| Error::Xml(format!("invalid entity in cell value: {}", e)))
}

/// Convert Excel reference (e.g., "A1") to 1-based `(col, row)` coordinates.
pub fn reference_to_coords(reference: &str) -> Result<(u32, u32)> {
    let bytes = reference.as_bytes();
    let col_str_end = bytes
        .iter()
        .position(|byte| byte.is_ascii_digit())
        .unwrap_or(bytes.len());

    if col_str_end == 0 {
        return Err(Error::InvalidFormat(format!("Invalid reference: {}", reference)));
    }

    // Convert column letters to number (A=1, B=2, ..., Z=26, AA=27, etc.)
    let mut col_num = 0u32;
    for &byte in &bytes[..col_str_end] {
        if !byte.is_ascii_alphabetic() {
            return Err(Error::InvalidFormat(format!(
                "Invalid column in reference: {}",
                reference
            )));
        }
        col_num = col_num
            .checked_mul(26)
            .and_then(|n| n.checked_add((byte.to_ascii_uppercase() - b'A' + 1) as u32))
            .ok_or_else(|| Error::InvalidFormat(format!("Column out of range in reference: {}", reference)))?;
    }

    let row_num = reference[col_str_end..].parse::<u32>().unwrap_or(0);

    Ok((col_num, row_num))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings() -> SharedStrings {
        SharedStrings::parse("<sst><si><t>Leistung</t></si><si><t>Web</t></si></sst>").unwrap()
    }

    #[test]
    fn reference_conversion() {
        assert_eq!(reference_to_coords("A1").unwrap(), (1, 1));
        assert_eq!(reference_to_coords("AB12").unwrap(), (28, 12));
        assert_eq!(reference_to_coords("c3").unwrap(), (3, 3));
        assert!(reference_to_coords("12").is_err());
        assert!(reference_to_coords("A-1").is_err());
    }

    #[test]
    fn parses_value_kinds() {
        let xml = r#"<worksheet><sheetData>
  <row r="1">
    <c r="A1" t="s"><v>0</v></c>
    <c r="B1" t="inlineStr"><is><t>nicht verf&#252;gbar</t></is></c>
    <c r="C1"><v>42</v></c>
    <c r="D1" t="b"><v>1</v></c>
    <c r="E1" t="str"><f>A1&amp;"x"</f><v>Leistungx</v></c>
    <c r="F1" t="e"><v>#N/A</v></c>
  </row>
  <row r="3"><c r="B3" s="2"/><c r="C3" t="s" s="1"><v>1</v></c></row>
</sheetData></worksheet>"#;
        let sheet = Worksheet::parse("Liste", xml, &strings()).unwrap();

        assert_eq!(sheet.text(1, 1), "Leistung");
        assert_eq!(sheet.text(1, 2), "nicht verfügbar");
        assert_eq!(sheet.cell(1, 3).unwrap().value, CellValue::Number(42.0));
        assert_eq!(sheet.text(1, 3), "42");
        assert_eq!(sheet.cell(1, 4).unwrap().value, CellValue::Bool(true));
        assert_eq!(sheet.text(1, 5), "Leistungx");
        assert_eq!(sheet.text(1, 6), "#N/A");

        let styled = sheet.cell(3, 2).unwrap();
        assert_eq!(styled.value, CellValue::Empty);
        assert_eq!(styled.style, Some(2));
        assert_eq!(sheet.text(3, 3), "Web");
        assert_eq!(sheet.text(2, 1), "");
        assert_eq!((sheet.max_row(), sheet.max_col()), (3, 6));
    }

    #[test]
    fn cells_without_reference_follow_previous() {
        let xml = "<worksheet><sheetData><row><c t=\"inlineStr\"><is><t>a</t></is></c><c><v>2.5</v></c></row>\
                   <row><c r=\"C2\"><v>1</v></c><c><v>2</v></c></row></sheetData></worksheet>";
        let sheet = Worksheet::parse("S", xml, &SharedStrings::new()).unwrap();
        assert_eq!(sheet.text(1, 1), "a");
        assert_eq!(sheet.text(1, 2), "2.5");
        assert_eq!(sheet.text(2, 3), "1");
        assert_eq!(sheet.text(2, 4), "2");
    }

    #[test]
    fn oversized_column_reference_is_an_error() {
        assert!(matches!(
            reference_to_coords("AAAAAAAAAAAAAAAA1"),
            Err(Error::InvalidFormat(_))
        ));
        assert_eq!(reference_to_coords("MWLQKWU1").unwrap(), (u32::MAX, 1));

        let xml = r#"<worksheet><sheetData><row r="1"><c r="AAAAAAAAAAAAAAAA1"><v>1</v></c></row></sheetData></worksheet>"#;
        assert!(matches!(
            Worksheet::parse("Matrix", xml, &SharedStrings::new()),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn implicit_positions_past_the_limit_are_errors() {
        let rows = r#"<worksheet><sheetData><row r="4294967295"/><row><c r="A1"><v>1</v></c></row></sheetData></worksheet>"#;
        assert!(matches!(
            Worksheet::parse("Liste", rows, &SharedStrings::new()),
            Err(Error::InvalidFormat(_))
        ));

        let cols = r#"<worksheet><sheetData><row r="1"><c r="MWLQKWU1"><v>1</v></c><c><v>2</v></c></row></sheetData></worksheet>"#;
        assert!(matches!(
            Worksheet::parse("Liste", cols, &SharedStrings::new()),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn shared_string_out_of_range_is_an_error() {
        let xml = r#"<worksheet><sheetData><row r="1"><c r="A1" t="s"><v>7</v></c></row></sheetData></worksheet>"#;
        assert!(matches!(
            Worksheet::parse("S", xml, &strings()),
            Err(Error::InvalidFormat(_))
        ));
    }
}
