//! Processing pipeline: scan the source directory, then render and write
//! the outputs.
//!
//! Nothing is written when the scan finds no books.

use tracing::warn;

use crate::config::BuildConfig;
use crate::export::{ExportSummary, write_outputs};
use crate::library::registry::{ScanReport, scan_directory};
use crate::newick::{DistanceSource, RandomDistance};

/// Result of a full build.
#[derive(Debug)]
pub struct BuildOutcome {
    pub scan: ScanReport,
    /// `None` when there was nothing to write.
    pub export: Option<ExportSummary>,
}

/// The distance source a config asks for.
pub fn distances_for(config: &BuildConfig) -> Box<dyn DistanceSource> {
    match config.seed {
        Some(seed) => Box::new(RandomDistance::seeded(seed)),
        None => Box::new(RandomDistance::from_entropy()),
    }
}

/// Scan, render and write according to `config`.
pub fn build(config: &BuildConfig) -> BuildOutcome {
    let mut distances = distances_for(config);
    build_with(config, distances.as_mut())
}

/// [`build`] with an explicit distance source.
pub fn build_with(config: &BuildConfig, distances: &mut dyn DistanceSource) -> BuildOutcome {
    let scan = scan_directory(&config.source_dir);

    if scan.is_empty() {
        warn!(
            dir = %config.source_dir.display(),
            "no books catalogued, no output written"
        );
        return BuildOutcome { scan, export: None };
    }

    let export = write_outputs(&scan.grouping, config, distances);
    BuildOutcome {
        scan,
        export: Some(export),
    }
}
