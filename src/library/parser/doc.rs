//! Word 97-2003 (.doc) detection.
//!
//! The binary format is an OLE2/CFB container that cannot be read without
//! a full MS-DOC implementation. Files are checked for the CFB signature
//! and then rejected with conversion guidance, so they are skipped like
//! any other unreadable document.

use crate::library::error::{LibraryError, LibraryResult};
use crate::library::model::{ContentFormat, ParsedDocument};
use crate::library::parser::ContentParser;

/// `D0 CF 11 E0 A1 B1 1A E1`, shared by every OLE-based Office format.
const CFB_MAGIC_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Whether the bytes start with the OLE2/CFB signature.
pub fn has_cfb_signature(data: &[u8]) -> bool {
    data.starts_with(&CFB_MAGIC_SIGNATURE)
}

pub struct LegacyDocParser;

impl ContentParser for LegacyDocParser {
    fn format(&self) -> ContentFormat {
        ContentFormat::Doc
    }

    fn parse(&self, data: &[u8]) -> LibraryResult<ParsedDocument> {
        if !has_cfb_signature(data) {
            return Err(LibraryError::ParseError {
                format: ContentFormat::Doc.as_str().into(),
                message: "missing OLE2/CFB signature".into(),
            });
        }
        Err(LibraryError::UnsupportedFormat {
            format: "Word 97-2003 (.doc)".into(),
        })
    }
}
