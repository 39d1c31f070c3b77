//! Document parser trait and format detection.
//!
//! Each supported format implements `ContentParser`.
//! The `parser_for()` factory returns the correct parser for a given format.

pub mod doc;
pub mod docx;

use crate::library::error::LibraryResult;
use crate::library::model::{ContentFormat, ParsedDocument};

/// Trait for format-specific document parsers.
pub trait ContentParser {
    /// Parse raw bytes into body paragraphs.
    fn parse(&self, data: &[u8]) -> LibraryResult<ParsedDocument>;

    /// The format this parser handles.
    fn format(&self) -> ContentFormat;
}

/// Get the appropriate parser for a content format.
pub fn parser_for(format: ContentFormat) -> Box<dyn ContentParser> {
    match format {
        ContentFormat::Docx => Box::new(docx::DocxParser),
        ContentFormat::Doc => Box::new(doc::LegacyDocParser),
    }
}

/// Detect the content format from a file extension.
pub fn detect_format(path: &str) -> Option<ContentFormat> {
    let lower = path.to_lowercase();
    if lower.ends_with(".docx") {
        Some(ContentFormat::Docx)
    } else if lower.ends_with(".doc") {
        Some(ContentFormat::Doc)
    } else {
        None
    }
}
