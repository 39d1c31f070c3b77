//! Rich diagnostic error types for the book library.

use miette::Diagnostic;
use thiserror::Error;

/// Errors from reading and cataloguing source documents.
#[derive(Debug, Error, Diagnostic)]
pub enum LibraryError {
    #[error("source directory \"{dir}\" does not exist")]
    #[diagnostic(
        code(booktree::library::source_missing),
        help(
            "Create the directory and put the .docx files describing your books in it, \
             or point at another directory with --source."
        )
    )]
    SourceMissing { dir: String },

    #[error("no .doc or .docx files found in \"{dir}\"")]
    #[diagnostic(
        code(booktree::library::no_documents),
        help("Only files ending in .doc or .docx are read. Hidden files are ignored.")
    )]
    NoDocuments { dir: String },

    #[error("\"{file}\" has {found} paragraph(s), at least two are required")]
    #[diagnostic(
        code(booktree::library::too_few_paragraphs),
        help(
            "The first paragraph must hold the book title and the second the \
             slash-separated classification, e.g. \"工程/力学\"."
        )
    )]
    TooFewParagraphs { file: String, found: usize },

    #[error("unsupported content format: \"{format}\"")]
    #[diagnostic(
        code(booktree::library::unsupported_format),
        help(
            "Word 97-2003 (.doc) files cannot be read directly. Convert them with \
             `soffice --headless --convert-to docx <file>` and re-run."
        )
    )]
    UnsupportedFormat { format: String },

    #[error("parse error in {format} document: {message}")]
    #[diagnostic(
        code(booktree::library::parse_error),
        help(
            "The document could not be parsed. Verify the file is valid {format} \
             and not corrupted."
        )
    )]
    ParseError { format: String, message: String },

    #[error("failed to process \"{file}\"")]
    #[diagnostic(code(booktree::library::file_failed))]
    FileFailed {
        file: String,
        #[source]
        source: Box<LibraryError>,
    },

    #[error("I/O error on \"{path}\": {source}")]
    #[diagnostic(
        code(booktree::library::io),
        help("A filesystem operation failed. Check file paths and permissions.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl LibraryError {
    /// Attach the name of the file being processed, unless the error
    /// already names it.
    pub fn in_file(self, file: impl Into<String>) -> Self {
        match self {
            Self::TooFewParagraphs { .. } | Self::FileFailed { .. } => self,
            other => Self::FileFailed {
                file: file.into(),
                source: Box::new(other),
            },
        }
    }
}

/// Convenience alias for library operation results.
pub type LibraryResult<T> = std::result::Result<T, LibraryError>;
