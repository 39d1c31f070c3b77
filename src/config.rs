//! Build configuration, persisted as TOML.
//!
//! Every field has a default, so an empty file (or no file at all) reads
//! `data/` and writes the two output files into the working directory.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or saving a build configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read build config: {path}")]
    #[diagnostic(
        code(booktree::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse build config: {path}")]
    #[diagnostic(
        code(booktree::config::parse),
        help("Check the TOML syntax. Known keys: source_dir, tree_output, report_output, compact_tree_output, show_distance, seed.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write build config: {path}")]
    #[diagnostic(
        code(booktree::config::write),
        help("Ensure you have write permissions to the target directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Where to read documents from and where to write the results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Directory holding the `.doc`/`.docx` files.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    /// Indented tree output.
    #[serde(default = "default_tree_output")]
    pub tree_output: PathBuf,
    /// Plain-text report output.
    #[serde(default = "default_report_output")]
    pub report_output: PathBuf,
    /// Optional single-line tree output.
    #[serde(default)]
    pub compact_tree_output: Option<PathBuf>,
    /// Annotate tree nodes with distances.
    #[serde(default = "default_show_distance")]
    pub show_distance: bool,
    /// Seed for reproducible distances; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_tree_output() -> PathBuf {
    PathBuf::from("phylogenetic_tree_indented.txt")
}
fn default_report_output() -> PathBuf {
    PathBuf::from("books_report.txt")
}
fn default_show_distance() -> bool {
    true
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            tree_output: default_tree_output(),
            report_output: default_report_output(),
            compact_tree_output: None,
            show_distance: default_show_distance(),
            seed: None,
        }
    }
}

impl BuildConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}
