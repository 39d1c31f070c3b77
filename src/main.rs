//! booktree CLI: catalogue book documents into a subject/decade tree.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use booktree::config::BuildConfig;
use booktree::error::{BookTreeError, BookTreeResult};
use booktree::library::{ScanReport, UNKNOWN_YEAR, catalogue_book, decade_of, scan_directory};
use booktree::newick::{TreeStyle, render_tree};
use booktree::pipeline::{self, distances_for};
use booktree::report::render_report;

#[derive(Parser)]
#[command(
    name = "booktree",
    version,
    about = "Group book documents by subject and decade"
)]
struct Cli {
    /// Build configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the .doc/.docx files (overrides the config).
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the documents and write the tree and report files (default).
    Build {
        /// Seed for reproducible distances.
        #[arg(long)]
        seed: Option<u64>,

        /// Leave distances out of the tree.
        #[arg(long)]
        no_distance: bool,

        /// Also write a single-line tree to this file.
        #[arg(long)]
        compact_output: Option<PathBuf>,
    },

    /// Print the tree to stdout.
    Tree {
        /// Single line instead of indented.
        #[arg(long)]
        compact: bool,

        /// Leave distances out of the tree.
        #[arg(long)]
        no_distance: bool,

        /// Seed for reproducible distances.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the text report to stdout.
    Report,

    /// Show which documents were read and which were skipped.
    Scan {
        /// Print the subject/decade grouping as JSON instead.
        #[arg(long)]
        json: bool,
    },

    /// Show how a title line is interpreted.
    Classify {
        /// A title line, e.g. "材料力学1987[张三]".
        text: String,
    },

    /// Write a configuration file with all defaults.
    InitConfig {
        /// Where to write it.
        #[arg(default_value = "booktree.toml")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = load_config(&cli)?;

    let command = cli.command.unwrap_or(Commands::Build {
        seed: None,
        no_distance: false,
        compact_output: None,
    });

    match command {
        Commands::Build {
            seed,
            no_distance,
            compact_output,
        } => {
            if seed.is_some() {
                config.seed = seed;
            }
            if no_distance {
                config.show_distance = false;
            }
            if compact_output.is_some() {
                config.compact_tree_output = compact_output;
            }

            let outcome = pipeline::build(&config);
            print_scan_summary(&outcome.scan);

            match outcome.export {
                None => println!("No book data available; nothing written."),
                Some(summary) => {
                    for (kind, path) in &summary.written {
                        println!("Wrote {kind}: {}", path.display());
                    }
                    for failure in summary.failures {
                        print_diagnostic(failure);
                    }
                }
            }
        }

        Commands::Tree {
            compact,
            no_distance,
            seed,
        } => {
            if seed.is_some() {
                config.seed = seed;
            }
            let scan = scan_directory(&config.source_dir);
            if scan.is_empty() {
                println!("No book data available; no tree generated.");
                return Ok(());
            }
            let style = TreeStyle {
                indented: !compact,
                show_distance: config.show_distance && !no_distance,
            };
            let mut distances = distances_for(&config);
            println!("{}", render_tree(&scan.grouping, style, distances.as_mut()));
        }

        Commands::Report => {
            let scan = scan_directory(&config.source_dir);
            if scan.is_empty() {
                println!("No book data available; no report generated.");
                return Ok(());
            }
            print!("{}", render_report(&scan.grouping));
        }

        Commands::Scan { json } => {
            let scan = scan_directory(&config.source_dir);
            if json {
                let out = serde_json::to_string_pretty(&scan.grouping).into_diagnostic()?;
                println!("{out}");
            } else {
                for name in &scan.loaded {
                    println!("  OK       {name}");
                }
                print_scan_summary(&scan);
                for diagnostic in scan.diagnostics {
                    print_diagnostic(diagnostic);
                }
            }
        }

        Commands::Classify { text } => {
            let book = catalogue_book(&text, "");
            let record = &book.record;
            println!("title:   {}", record.title);
            println!(
                "author:  {}",
                if record.has_author() { record.author.as_str() } else { "(none)" }
            );
            if record.year == UNKNOWN_YEAR {
                println!("year:    (unknown)");
            } else {
                println!("year:    {}", record.year);
            }
            println!("decade:  {}", decade_of(record.year));
            println!("subject: {}", book.subject);
        }

        Commands::InitConfig { path } => {
            BuildConfig::default()
                .save(&path)
                .map_err(BookTreeError::from)?;
            println!("Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}

/// Config file (if any) with the `--source` override applied.
fn load_config(cli: &Cli) -> BookTreeResult<BuildConfig> {
    let mut config = match &cli.config {
        Some(path) => BuildConfig::load(path)?,
        None => BuildConfig::default(),
    };
    if let Some(source) = &cli.source {
        config.source_dir = source.clone();
    }
    Ok(config)
}

/// Print a non-fatal error with its code and help text.
fn print_diagnostic(error: impl Into<BookTreeError>) {
    eprintln!("{:?}", miette::Report::new(error.into()));
}

fn print_scan_summary(scan: &ScanReport) {
    println!(
        "Catalogued {} book(s) from {}: {} file(s) read, {} problem(s).",
        scan.grouping.book_count(),
        scan.source_dir.display(),
        scan.loaded.len(),
        scan.diagnostics.len(),
    );
}
