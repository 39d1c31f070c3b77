//! Core data types for the book library.
//!
//! A source document contributes exactly one [`BookRecord`]: the first
//! paragraph is the raw title line, the second holds slash-delimited
//! classification tags.

use serde::{Deserialize, Serialize};

/// Year recorded when the title line carries no four-digit number.
pub const UNKNOWN_YEAR: u32 = 9999;

/// Decade bucket of [`UNKNOWN_YEAR`]; marks "year unknown" in output.
pub const UNKNOWN_DECADE: u32 = decade_of(UNKNOWN_YEAR);

/// Round a year down to its decade bucket (`1983` -> `1980`).
pub const fn decade_of(year: u32) -> u32 {
    year / 10 * 10
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentFormat {
    /// Office Open XML word-processor document.
    Docx,
    /// Word 97-2003 binary document.
    Doc,
}

impl ContentFormat {
    /// Human-readable name for diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Doc => "doc",
        }
    }
}

impl std::fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of parsing a document: its body paragraphs in reading order.
///
/// Empty paragraphs are kept so that paragraph positions match what a
/// word processor shows.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub paragraphs: Vec<String>,
}

/// One catalogued book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Whitespace-normalized title, with any bracketed author removed.
    pub title: String,
    /// Author name; empty when none was found.
    pub author: String,
    /// Publication year, or [`UNKNOWN_YEAR`].
    pub year: u32,
    /// Classification tags from the second paragraph, in order.
    pub classification: Vec<String>,
}

impl BookRecord {
    /// Whether a publication year was found.
    pub fn has_year(&self) -> bool {
        self.year != UNKNOWN_YEAR
    }

    /// Whether an author was found.
    pub fn has_author(&self) -> bool {
        !self.author.is_empty()
    }

    /// Decade bucket this record belongs to.
    pub fn decade(&self) -> u32 {
        decade_of(self.year)
    }
}
