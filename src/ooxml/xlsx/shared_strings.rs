//! Shared strings table for Excel files.
//!
//! Excel stores most cell text once in xl/sharedStrings.xml and refers to it
//! by index. Each `<si>` item is either a plain `<t>` or a list of rich-text
//! runs `<r><t>..</t></r>`; phonetic hints (`<rPh>`) are not part of the text.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::common::{Error, Result};

/// Shared strings table.
#[derive(Debug, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    /// Create a new empty shared strings table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse shared strings from xl/sharedStrings.xml content.
    pub fn parse(content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(content);
        let mut strings = Vec::new();
        let mut buf = Vec::with_capacity(256);

        loop {
            buf.clear();
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) if e.local_name().as_ref() == b"si" => {
                    strings.push(read_rich_text(&mut reader, b"si")?);
                },
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(format!("XML error in sharedStrings: {}", e))),
                _ => {},
            }
        }

        Ok(SharedStrings { strings })
    }

    /// Get a string by its index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Get the number of strings in the table.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Collect the text of all `<t>` elements up to the end tag `end`.
///
/// Used for shared string items and inline strings alike. Runs inside
/// `<rPh>` are skipped. Entity references are resolved.
pub(crate) fn read_rich_text(reader: &mut Reader<&[u8]>, end: &[u8]) -> Result<String> {
    let mut raw = String::new();
    let mut in_text = false;
    let mut phonetic_depth = 0usize;
    let mut buf = Vec::with_capacity(128);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"rPh" => phonetic_depth += 1,
                b"t" if phonetic_depth == 0 => in_text = true,
                _ => {},
            },
            Ok(Event::End(e)) => {
                let name = e.local_name();
                if name.as_ref() == end {
                    break;
                }
                match name.as_ref() {
                    b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                    b"t" => in_text = false,
                    _ => {},
                }
            },
            Ok(Event::Text(e)) if in_text => {
                raw.push_str(std::str::from_utf8(&e)?);
            },
            Ok(Event::GeneralRef(e)) if in_text => {
                raw.push('&');
                raw.push_str(std::str::from_utf8(&e)?);
                raw.push(';');
            },
            Ok(Event::CData(e)) if in_text => {
                // Escape so the final unescape pass restores the literal text.
                let text = std::str::from_utf8(&e)?;
                raw.push_str(&quick_xml::escape::escape(text));
            },
            Ok(Event::Eof) => {
                return Err(Error::Xml(format!(
                    "unexpected end of document inside <{}>",
                    String::from_utf8_lossy(end)
                )));
            },
            Err(e) => return Err(Error::Xml(format!("XML error in text run: {}", e))),
            _ => {},
        }
    }

    quick_xml::escape::unescape(&raw)
        .map(|text| text.into_owned())
        .map_err(|e| Error::Xml(format!("invalid entity in text: {}", e)))
}
