//! In-memory .xlsx builder for tests.
//!
//! Sheets are given as rows of cell descriptors. A descriptor is the cell text,
//! optionally followed by `@<style index>`; `@3` alone is an empty cell with
//! style 3 and an empty descriptor writes no cell at all.

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

#[derive(Debug, Default)]
pub(crate) struct Fixture {
    sheets: Vec<(String, String)>,
    styles: Option<String>,
    shared_strings: Option<String>,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a sheet built from cell descriptors.
    pub(crate) fn sheet(self, name: &str, rows: &[&[&str]]) -> Self {
        let xml = sheet_xml(rows);
        self.raw_sheet(name, &xml)
    }

    /// Add a sheet with literal worksheet XML.
    pub(crate) fn raw_sheet(mut self, name: &str, xml: &str) -> Self {
        self.sheets.push((name.to_string(), xml.to_string()));
        self
    }

    pub(crate) fn styles(mut self, xml: String) -> Self {
        self.styles = Some(xml);
        self
    }

    pub(crate) fn shared_strings(mut self, strings: &[&str]) -> Self {
        let items: String = strings
            .iter()
            .map(|s| format!("<si><t>{}</t></si>", escape(*s)))
            .collect();
        self.shared_strings = Some(format!(
            r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">{1}</sst>"#,
            strings.len(),
            items
        ));
        self
    }

    /// Package everything as .xlsx bytes.
    pub(crate) fn build(self) -> Vec<u8> {
        let mut sheet_entries = String::new();
        let mut rels = String::new();
        let mut parts = Vec::new();

        for (index, (name, xml)) in self.sheets.iter().enumerate() {
            let n = index + 1;
            sheet_entries.push_str(&format!(
                r#"<sheet name="{}" sheetId="{n}" r:id="rId{n}"/>"#,
                escape(name.as_str())
            ));
            rels.push_str(&format!(
                r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{n}.xml"/>"#
            ));
            parts.push((format!("xl/worksheets/sheet{n}.xml"), xml.clone()));
        }

        let workbook = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{sheet_entries}</sheets></workbook>"#
        );
        let workbook_rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
        );

        let mut entries: Vec<(String, String)> = vec![
            ("[Content_Types].xml".to_string(), CONTENT_TYPES.to_string()),
            ("_rels/.rels".to_string(), ROOT_RELS.to_string()),
            ("xl/workbook.xml".to_string(), workbook),
            ("xl/_rels/workbook.xml.rels".to_string(), workbook_rels),
        ];
        entries.extend(parts);
        if let Some(styles) = self.styles {
            entries.push(("xl/styles.xml".to_string(), styles));
        }
        if let Some(sst) = self.shared_strings {
            entries.push(("xl/sharedStrings.xml".to_string(), sst));
        }

        let borrowed: Vec<(&str, &str)> = entries
            .iter()
            .map(|(name, content)| (name.as_str(), content.as_str()))
            .collect();
        Self::archive(&borrowed)
    }

    /// Zip arbitrary entries.
    pub(crate) fn archive(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, content) in entries {
            writer.start_file(*name, options).expect("start zip entry");
            writer.write_all(content.as_bytes()).expect("write zip entry");
        }
        writer.finish().expect("finish zip").into_inner()
    }
}

/// Worksheet XML with inline-string cells from cell descriptors.
pub(crate) fn sheet_xml(rows: &[&[&str]]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    for (row_index, row) in rows.iter().enumerate() {
        let r = row_index + 1;
        xml.push_str(&format!(r#"<row r="{r}">"#));
        for (col_index, descriptor) in row.iter().enumerate() {
            if descriptor.is_empty() {
                continue;
            }
            let reference = format!("{}{}", column_letters(col_index as u32 + 1), r);
            let (text, style) = match descriptor.rsplit_once('@') {
                Some((text, style)) => (text, format!(r#" s="{style}""#)),
                None => (*descriptor, String::new()),
            };
            if text.is_empty() {
                xml.push_str(&format!(r#"<c r="{reference}"{style}/>"#));
            } else {
                xml.push_str(&format!(
                    r#"<c r="{reference}"{style} t="inlineStr"><is><t>{}</t></is></c>"#,
                    escape(text)
                ));
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

/// styles.xml whose cell style `i + 1` applies `fills[i]`.
///
/// Each entry is the inner XML of a `<fill>` element.
pub(crate) fn styles_with_fills(fills: &[&str]) -> String {
    let mut fill_xml = String::from(
        r#"<fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill>"#,
    );
    let mut xfs = String::from(r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#);
    for (index, fill) in fills.iter().enumerate() {
        fill_xml.push_str(&format!("<fill>{fill}</fill>"));
        xfs.push_str(&format!(
            r#"<xf numFmtId="0" fontId="0" fillId="{}" borderId="0" xfId="0" applyFill="1"/>"#,
            index + 2
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
<fills count="{}">{fill_xml}</fills>
<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
<cellXfs count="{}">{xfs}</cellXfs>
</styleSheet>"#,
        fills.len() + 2,
        fills.len() + 1
    )
}

fn column_letters(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.push(b'A' + rem as u8);
        col = (col - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).expect("ascii letters")
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;
