// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # booktree
//!
//! Catalogues a directory of word-processor documents, one per book, and
//! groups the books by subject and decade.
//!
//! ## Architecture
//!
//! - **Library** (`library`): DOCX reading, title-line metadata extraction,
//!   keyword subject classification, and the subject/decade [`Grouping`]
//! - **Tree** (`newick`): Newick-style bracket notation with cosmetic distances
//! - **Report** (`report`): plain-text hierarchical report
//! - **Pipeline** (`pipeline`, `export`, `config`): scan, render and write
//!
//! ## Library usage
//!
//! ```no_run
//! use booktree::library::scan_directory;
//! use booktree::newick::{FixedDistance, TreeStyle, render_tree};
//!
//! let scan = scan_directory(std::path::Path::new("data"));
//! let tree = render_tree(&scan.grouping, TreeStyle::COMPACT, &mut FixedDistance(0.2));
//! println!("{tree}");
//! ```
//!
//! [`Grouping`]: library::Grouping

pub mod config;
pub mod error;
pub mod export;
pub mod library;
pub mod newick;
pub mod pipeline;
pub mod report;
