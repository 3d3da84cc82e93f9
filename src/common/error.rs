//! Unified error type for jobslot.
//!
//! Every fallible operation in the crate (category validation, spreadsheet
//! import, rule persistence) reports through [`Error`], so callers only have
//! to match on one type.

use thiserror::Error;

use crate::catalog::Axis;

/// Main error type for jobslot operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A category value outside the option list of its axis
    #[error("invalid {axis} value: {value:?}")]
    InvalidArgument { axis: Axis, value: String },

    /// An axis without any options cannot be resolved from a wheel index
    #[error("{0} has no options")]
    EmptyAxis(Axis),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Invalid spreadsheet structure
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A list sheet whose header row lacks a required label
    #[error("sheet '{sheet}' is missing the '{label}' header")]
    MissingHeader { sheet: String, label: &'static str },

    /// Rule file could not be serialized or written
    #[error("Persistence error: {0}")]
    Persist(String),
}

/// Result type for jobslot operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Zip(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Xml(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_names_axis_and_value() {
        let err = Error::InvalidArgument {
            axis: Axis::Leistung,
            value: "Radio".to_string(),
        };
        assert_eq!(err.to_string(), "invalid Leistung value: \"Radio\"");
    }

    #[test]
    fn missing_header_message() {
        let err = Error::MissingHeader {
            sheet: "Liste".to_string(),
            label: "status",
        };
        assert_eq!(err.to_string(), "sheet 'Liste' is missing the 'status' header");
    }
}
