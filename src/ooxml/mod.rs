//! OOXML (Office Open XML) file format support.
//!
//! Only the SpreadsheetML reader needed to import rule sheets is provided.

pub mod xlsx;
