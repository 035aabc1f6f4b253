use std::path::PathBuf;

use clap::Args;

use super::parse::parse_status;
use cegate_core::history::HistoryStatus;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Manifest files, evaluated in the given order
    pub manifests: Vec<PathBuf>,

    /// Directory receiving metrics and report artifacts
    #[arg(long)]
    pub reports_dir: Option<PathBuf>,

    /// Read precomputed metrics from this directory instead of the stub provider
    #[arg(long)]
    pub metrics_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// Show only the entry for this key (model_id::version::evaluation_profile)
    #[arg(long, short)]
    pub key: Option<String>,

    /// Filter entries by status (pass, failed_gate)
    #[arg(long, short, value_parser = parse_status, conflicts_with = "key")]
    pub status: Option<HistoryStatus>,
}

#[derive(Args, Debug, Clone)]
pub struct KeyArgs {
    /// Manifest file
    pub manifest: PathBuf,
}
