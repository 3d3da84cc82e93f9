//! XML parser for styles.xml file.
//!
//! Streams the document with quick-xml and picks out the `fills` and
//! `cellXfs` sections. Fonts, borders and number formats are skipped.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{CellFormat, Color, Fill, Styles};
use crate::common::{Error, Result};

/// Parse styles from xl/styles.xml XML content.
pub fn parse_styles(content: &str) -> Result<Styles> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut styles = Styles::new();
    let mut buf = Vec::with_capacity(1024);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"fills" => {
                    parse_fills(&mut reader, &mut styles.fills)?;
                },
                b"cellXfs" => {
                    parse_cell_xfs(&mut reader, &mut styles.cell_xfs)?;
                },
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Xml(format!("XML parsing error: {}", e)));
            },
            _ => {},
        }
    }

    Ok(styles)
}

/// Parse fills section.
fn parse_fills(reader: &mut Reader<&[u8]>, fills: &mut Vec<Fill>) -> Result<()> {
    let mut buf = Vec::with_capacity(512);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"fill" => {
                let fill = parse_fill(reader)?;
                fills.push(fill);
            },
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"fill" => {
                fills.push(Fill::None);
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"fills" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("XML error in fills: {}", e))),
            _ => {},
        }
    }

    Ok(())
}

/// Parse a single fill element.
fn parse_fill(reader: &mut Reader<&[u8]>) -> Result<Fill> {
    let mut fill = Fill::None;
    let mut buf = Vec::with_capacity(256);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"patternFill" => {
                let kind = pattern_type(reader, &e);
                let (fg_color, bg_color) = parse_pattern_colors(reader)?;
                fill = pattern_fill(kind, fg_color, bg_color);
            },
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"patternFill" => {
                fill = pattern_fill(pattern_type(reader, &e), None, None);
            },
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"gradientFill" => {
                fill = parse_gradient_fill(reader, &e)?;
            },
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"gradientFill" => {
                fill = Fill::Gradient {
                    gradient_type: attribute(reader, &e, b"type"),
                };
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"fill" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("XML error in fill: {}", e))),
            _ => {},
        }
    }

    Ok(fill)
}

fn pattern_type(reader: &Reader<&[u8]>, start: &BytesStart) -> String {
    attribute(reader, start, b"patternType").unwrap_or_else(|| String::from("none"))
}

fn pattern_fill(pattern_type: String, fg_color: Option<Color>, bg_color: Option<Color>) -> Fill {
    if pattern_type == "none" {
        Fill::None
    } else {
        Fill::Pattern {
            pattern_type,
            fg_color,
            bg_color,
        }
    }
}

/// Read the color children of a `patternFill` up to its end tag.
fn parse_pattern_colors(reader: &mut Reader<&[u8]>) -> Result<(Option<Color>, Option<Color>)> {
    let mut fg_color = None;
    let mut bg_color = None;

    let mut buf = Vec::with_capacity(128);
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"fgColor" => {
                    fg_color = parse_color(reader, &e);
                },
                b"bgColor" => {
                    bg_color = parse_color(reader, &e);
                },
                _ => {},
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"patternFill" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("XML error in patternFill: {}", e))),
            _ => {},
        }
    }

    Ok((fg_color, bg_color))
}

/// Parse a gradient fill, skipping its stops.
fn parse_gradient_fill(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<Fill> {
    let gradient_type = attribute(reader, start, b"type");

    let mut buf = Vec::with_capacity(128);
    let mut depth = 1;
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"gradientFill" => depth += 1,
            Ok(Event::End(e)) if e.local_name().as_ref() == b"gradientFill" => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("XML error in gradientFill: {}", e))),
            _ => {},
        }
    }

    Ok(Fill::Gradient { gradient_type })
}

/// Parse cell XFs (cell format records).
fn parse_cell_xfs(reader: &mut Reader<&[u8]>, cell_xfs: &mut Vec<CellFormat>) -> Result<()> {
    let mut buf = Vec::with_capacity(512);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            // Children of xf (alignment, protection) carry no fill information.
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"xf" => {
                cell_xfs.push(CellFormat {
                    fill_id: attribute(reader, &e, b"fillId").and_then(|v| v.parse::<u32>().ok()),
                });
            },
            Ok(Event::End(e)) if e.local_name().as_ref() == b"cellXfs" => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("XML error in cellXfs: {}", e))),
            _ => {},
        }
    }

    Ok(())
}

/// Parse color from a color element.
///
/// Colors can be specified as:
/// - RGB hex value (rgb attribute)
/// - Theme color (theme attribute with optional tint)
/// - Indexed color (indexed attribute)
/// - Auto color
fn parse_color(reader: &Reader<&[u8]>, start: &BytesStart) -> Option<Color> {
    for attr in start.attributes().flatten() {
        let Ok(value) = attr.decode_and_unescape_value(reader.decoder()) else {
            continue;
        };
        match attr.key.local_name().as_ref() {
            b"rgb" => return Some(Color::Rgb(value.to_string())),
            b"theme" => {
                if let Ok(index) = value.parse::<u32>() {
                    return Some(Color::Theme(index));
                }
            },
            b"indexed" => {
                if let Ok(index) = value.parse::<u32>() {
                    return Some(Color::Indexed(index));
                }
            },
            b"auto" if value == "1" || value == "true" => return Some(Color::Auto),
            _ => {},
        }
    }

    None
}

/// Decoded value of the attribute with local name `name`.
pub(crate) fn attribute(reader: &Reader<&[u8]>, start: &BytesStart, name: &[u8]) -> Option<String> {
    start
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name)
        .and_then(|attr| attr.decode_and_unescape_value(reader.decoder()).ok())
        .map(|value| value.into_owned())
}
