//! Parser for Excel workbook.xml and its relationship part.
//!
//! workbook.xml lists the sheets by name and relationship ID; the
//! relationship part maps each ID to the worksheet part inside the package.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::Event;
use quick_xml::events::attributes::Attribute;

use super::styles::attribute;
use crate::common::{Error, Result};

/// A `<sheet>` entry of workbook.xml.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetEntry {
    /// Sheet name shown on the tab
    pub name: String,
    /// Relationship ID (`r:id`) pointing at the worksheet part
    pub relationship_id: Option<String>,
}

/// Parse workbook.xml content to extract the sheet list in tab order.
pub fn parse_workbook_xml(content: &str) -> Result<Vec<SheetEntry>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut sheets = Vec::new();
    let mut buf = Vec::with_capacity(512);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"sheet" => {
                let mut name = None;
                let mut relationship_id = None;
                for attr in e.attributes().flatten() {
                    // `r:id` is the only namespaced `id` attribute on <sheet>
                    match (attr.key.prefix().is_some(), attr.key.local_name().as_ref()) {
                        (false, b"name") => name = decoded(&reader, &attr),
                        (true, b"id") => relationship_id = decoded(&reader, &attr),
                        _ => {},
                    }
                }
                if let Some(name) = name {
                    sheets.push(SheetEntry {
                        name,
                        relationship_id,
                    });
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("XML error in workbook: {}", e))),
            _ => {},
        }
    }

    Ok(sheets)
}

fn decoded(reader: &Reader<&[u8]>, attr: &Attribute) -> Option<String> {
    attr.decode_and_unescape_value(reader.decoder())
        .ok()
        .map(|value| value.into_owned())
}

/// Parse a relationships part into `Id -> Target`.
pub fn parse_relationships(content: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut targets = HashMap::new();
    let mut buf = Vec::with_capacity(512);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) =
                    (attribute(&reader, &e, b"Id"), attribute(&reader, &e, b"Target"))
                {
                    targets.insert(id, target);
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("Rels parse error: {}", e))),
            _ => {},
        }
    }

    Ok(targets)
}

/// Resolve a relationship target of xl/workbook.xml to a package path.
pub fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target.trim_start_matches("./")),
    }
}
