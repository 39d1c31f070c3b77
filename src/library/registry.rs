//! Book registry: scans a directory of documents and groups the books
//! by subject and decade.
//!
//! Failures never abort the scan. A missing or empty directory produces an
//! empty [`Grouping`] with a single diagnostic; an unreadable file is
//! skipped and its error collected in [`ScanReport::diagnostics`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::library::classify::classify_subject;
use crate::library::error::{LibraryError, LibraryResult};
use crate::library::extract::{extract_year, format_book_info};
use crate::library::model::{BookRecord, ContentFormat, ParsedDocument};
use crate::library::parser;

/// Books of one subject, keyed by decade.
pub type DecadeBuckets = BTreeMap<u32, Vec<BookRecord>>;

/// subject -> decade -> books, in insertion order within a bucket.
///
/// Subjects iterate in lexical order and decades in numeric order. Books
/// inside a bucket are not sorted here; renderers sort them by year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Grouping {
    subjects: BTreeMap<String, DecadeBuckets>,
}

impl Grouping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to its `(subject, decade)` bucket.
    pub fn insert(&mut self, subject: &str, record: BookRecord) {
        self.subjects
            .entry(subject.to_string())
            .or_default()
            .entry(record.decade())
            .or_default()
            .push(record);
    }

    /// Make sure a subject exists, even without any books.
    pub fn add_subject(&mut self, subject: &str) {
        self.subjects.entry(subject.to_string()).or_default();
    }

    /// Subjects with their decade buckets, lexically ordered.
    pub fn subjects(&self) -> impl Iterator<Item = (&str, &DecadeBuckets)> {
        self.subjects.iter().map(|(name, decades)| (name.as_str(), decades))
    }

    /// The books of one bucket.
    pub fn bucket(&self, subject: &str, decade: u32) -> Option<&[BookRecord]> {
        self.subjects
            .get(subject)
            .and_then(|decades| decades.get(&decade))
            .map(Vec::as_slice)
    }

    /// Total number of books across all buckets.
    pub fn book_count(&self) -> usize {
        self.subjects
            .values()
            .flat_map(|decades| decades.values())
            .map(Vec::len)
            .sum()
    }

    /// Whether no book has been catalogued.
    pub fn is_empty(&self) -> bool {
        self.book_count() == 0
    }
}

impl From<BTreeMap<String, DecadeBuckets>> for Grouping {
    fn from(subjects: BTreeMap<String, DecadeBuckets>) -> Self {
        Self { subjects }
    }
}

/// A book together with the subject it was filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CataloguedBook {
    pub subject: &'static str,
    pub record: BookRecord,
}

/// Build a record from a document's title line and classification line.
///
/// Year and subject are read from the raw title line, before the author
/// is stripped from it.
pub fn catalogue_book(title_line: &str, classification_line: &str) -> CataloguedBook {
    let title_line = title_line.trim();
    let info = format_book_info(title_line);
    let year = extract_year(title_line);
    let subject = classify_subject(title_line);
    debug!(title = %info.title, year, subject, "catalogued title line");

    CataloguedBook {
        subject,
        record: BookRecord {
            title: info.title,
            author: info.author,
            year,
            classification: classification_line
                .trim()
                .split('/')
                .map(str::to_string)
                .collect(),
        },
    }
}

/// Outcome of scanning a source directory.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// The directory that was scanned.
    pub source_dir: PathBuf,
    pub grouping: Grouping,
    /// File names that produced a book, in processing order.
    pub loaded: Vec<String>,
    /// Why the scan came up empty, or why individual files were skipped.
    pub diagnostics: Vec<LibraryError>,
}

impl ScanReport {
    /// Whether there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.grouping.is_empty()
    }
}

/// Read every `.doc`/`.docx` file in `dir` and group the books found.
///
/// Files are processed in file-name order. Hidden files and
/// subdirectories are ignored.
pub fn scan_directory(dir: &Path) -> ScanReport {
    let mut report = ScanReport {
        source_dir: dir.to_path_buf(),
        ..Default::default()
    };

    if !dir.is_dir() {
        warn!(dir = %dir.display(), "source directory does not exist");
        report.diagnostics.push(LibraryError::SourceMissing {
            dir: dir.display().to_string(),
        });
        return report;
    }

    let documents = match list_documents(dir) {
        Ok(documents) => documents,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot list source directory");
            report.diagnostics.push(e);
            return report;
        }
    };

    if documents.is_empty() {
        warn!(dir = %dir.display(), "no .doc or .docx files found");
        report.diagnostics.push(LibraryError::NoDocuments {
            dir: dir.display().to_string(),
        });
        return report;
    }

    for (name, path, format) in documents {
        match load_book(&name, &path, format) {
            Ok(book) => {
                info!(file = %name, subject = book.subject, "loaded document");
                report.grouping.insert(book.subject, book.record);
                report.loaded.push(name);
            }
            Err(e) => {
                warn!(file = %name, error = %e, "skipping document");
                report.diagnostics.push(e.in_file(name));
            }
        }
    }

    report
}

/// Recognised documents in `dir` as `(file name, path, format)`, sorted.
fn list_documents(dir: &Path) -> LibraryResult<Vec<(String, PathBuf, ContentFormat)>> {
    let entries = std::fs::read_dir(dir).map_err(|e| LibraryError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut documents: Vec<_> = entries
        .flatten()
        .filter(|entry| entry.file_type().is_ok_and(|ft| !ft.is_dir()))
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            if name.starts_with('.') {
                return None;
            }
            let format = parser::detect_format(&name)?;
            Some((name, entry.path(), format))
        })
        .collect();

    documents.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(documents)
}

/// Parse one document into a catalogued book.
fn load_book(name: &str, path: &Path, format: ContentFormat) -> LibraryResult<CataloguedBook> {
    let data = std::fs::read(path).map_err(|e| LibraryError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let parser = parser::parser_for(format);
    debug!(file = %name, format = %parser.format(), bytes = data.len(), "parsing document");
    let ParsedDocument { paragraphs } = parser.parse(&data)?;

    match paragraphs.as_slice() {
        [title, classification, ..] => Ok(catalogue_book(title, classification)),
        _ => Err(LibraryError::TooFewParagraphs {
            file: name.to_string(),
            found: paragraphs.len(),
        }),
    }
}
