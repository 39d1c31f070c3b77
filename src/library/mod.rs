//! Book library: reading description documents and cataloguing them.
//!
//! Each source document describes one book. Its title line is mined for a
//! publication year and an author, classified into a subject, and filed in
//! a [`Grouping`] by subject and decade.

pub mod classify;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod registry;

pub use classify::{DEFAULT_SUBJECT, classify_subject};
pub use error::{LibraryError, LibraryResult};
pub use extract::{BookInfo, extract_year, format_book_info};
pub use model::{BookRecord, ContentFormat, UNKNOWN_DECADE, UNKNOWN_YEAR, decade_of};
pub use registry::{CataloguedBook, Grouping, ScanReport, catalogue_book, scan_directory};
