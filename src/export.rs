//! Writing the rendered tree and report to disk.
//!
//! Each output file is written independently: a failure is logged and
//! recorded, and the remaining files are still attempted.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;
use tracing::{error, info};

use crate::config::BuildConfig;
use crate::library::registry::Grouping;
use crate::newick::{DistanceSource, TreeStyle, render_tree};
use crate::report::render_report;

/// Errors from writing output files.
#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("failed to write {kind} to {path}")]
    #[diagnostic(
        code(booktree::export::write),
        help("Check that the output directory exists and is writable, and that the disk is not full.")
    )]
    Write {
        kind: OutputKind,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// The files a build produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    IndentedTree,
    CompactTree,
    Report,
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndentedTree => write!(f, "indented tree"),
            Self::CompactTree => write!(f, "compact tree"),
            Self::Report => write!(f, "report"),
        }
    }
}

/// What got written and what failed.
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub written: Vec<(OutputKind, PathBuf)>,
    pub failures: Vec<ExportError>,
}

impl ExportSummary {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Render and write every configured output.
///
/// Order: indented tree, compact tree (if configured), report.
pub fn write_outputs(
    grouping: &Grouping,
    config: &BuildConfig,
    distances: &mut dyn DistanceSource,
) -> ExportSummary {
    let mut summary = ExportSummary::default();

    let indented = TreeStyle {
        indented: true,
        show_distance: config.show_distance,
    };
    let tree = render_tree(grouping, indented, distances);
    record(&mut summary, OutputKind::IndentedTree, &config.tree_output, &tree);

    if let Some(path) = &config.compact_tree_output {
        let compact = TreeStyle {
            indented: false,
            ..indented
        };
        let tree = render_tree(grouping, compact, distances);
        record(&mut summary, OutputKind::CompactTree, path, &tree);
    }

    let report = render_report(grouping);
    record(&mut summary, OutputKind::Report, &config.report_output, &report);

    summary
}

fn record(summary: &mut ExportSummary, kind: OutputKind, path: &Path, content: &str) {
    match write_output(kind, path, content) {
        Ok(()) => {
            info!(%kind, path = %path.display(), "wrote output");
            summary.written.push((kind, path.to_path_buf()));
        }
        Err(e) => {
            error!(%kind, path = %path.display(), error = %e, "failed to write output");
            summary.failures.push(e);
        }
    }
}

/// Write one UTF-8 output file.
pub fn write_output(kind: OutputKind, path: &Path, content: &str) -> ExportResult<()> {
    std::fs::write(path, content).map_err(|e| ExportError::Write {
        kind,
        path: path.display().to_string(),
        source: e,
    })
}
