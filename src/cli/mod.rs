//! CLI argument parsing for cegate
//!
//! Supports global flags: --root, --config, --history, --format, --quiet,
//! --verbose, --log-level, --log-json

pub mod args;
pub mod format;
pub mod output;
pub mod parse;
pub mod paths;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{HistoryArgs, KeyArgs, RunArgs};
pub use output::OutputFormat;

/// cegate - continuous-evaluation gate for model releases
#[derive(Parser, Debug)]
#[command(name = "cegate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory that relative paths resolve against
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Config file (defaults to <root>/cegate.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// History store file (overrides config)
    #[arg(long, global = true)]
    pub history: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. debug, cegate_core=trace)
    #[arg(long, global = true, env = "CEGATE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate manifests and gate them against their thresholds
    Run(RunArgs),

    /// Show recorded evaluation history
    History(HistoryArgs),

    /// Print the identity key of a manifest
    Key(KeyArgs),
}
