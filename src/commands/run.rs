//! `cegate run` command - evaluate and gate a batch of manifests
//!
//! - Manifests are processed in argument order, one at a time
//! - A key with a recorded pass is skipped, not re-evaluated
//! - Every manifest is processed even after a gate failure
//! - Exit status is failure if any manifest failed its gate or errored

use cegate_core::artifacts::ReportWriter;
use cegate_core::error::{CeError, Result};
use cegate_core::history::HistoryStore;
use cegate_core::metrics::{DirMetricsProvider, MetricsProvider, StubMetricsProvider};
use cegate_core::orchestrator::{BatchReport, ManifestOutcome, Orchestrator};
use cegate_core::trace_time;
use tracing::debug;

use crate::cli::paths::resolve_manifest_paths;
use crate::cli::{OutputFormat, RunArgs};
use crate::commands::dispatch::CommandContext;
use crate::commands::format::{output_by_format_result, print_json};

/// Execute the run command
pub fn execute(ctx: &CommandContext, args: &RunArgs) -> Result<()> {
    let cli = ctx.cli;

    if args.manifests.is_empty() {
        output_by_format_result!(cli.format,
            json => print_json(&BatchReport::default().to_json()),
            human => {
                println!("No manifest paths provided. Nothing to do.");
            }
        )?;
        return Ok(());
    }

    let mut config = ctx.config()?;
    if let Some(dir) = &args.reports_dir {
        config.reports_dir = cegate_core::config::resolve(ctx.root, dir);
    }
    if let Some(dir) = &args.metrics_dir {
        config.metrics_dir = Some(cegate_core::config::resolve(ctx.root, dir));
    }

    let provider: Box<dyn MetricsProvider> = match &config.metrics_dir {
        Some(dir) => Box::new(DirMetricsProvider::new(dir)),
        None => Box::new(StubMetricsProvider),
    };
    let writer = ReportWriter::new(&config.reports_dir);
    let orchestrator = Orchestrator::new(
        HistoryStore::new(&config.history_path),
        provider.as_ref(),
        &writer,
    );

    debug!(
        history = %config.history_path.display(),
        reports = %config.reports_dir.display(),
        provider = provider.name(),
        "run_config"
    );

    let manifests = resolve_manifest_paths(ctx.root, &args.manifests);
    let human = cli.format == OutputFormat::Human;
    let report = orchestrator.run_with(&manifests, |outcome| {
        if human {
            print_outcome(outcome, cli.quiet);
        }
    })?;
    trace_time!(ctx.start, "run_command");

    output_by_format_result!(cli.format,
        json => print_json(&report.to_json()),
        human => {
            if !cli.quiet {
                print_summary(&report);
            }
        }
    )?;

    if report.passed() {
        Ok(())
    } else {
        Err(CeError::BatchFailed {
            gate_failures: report.gate_failures(),
            errors: report.errors(),
        })
    }
}

fn print_outcome(outcome: &ManifestOutcome, quiet: bool) {
    if !quiet && !matches!(outcome, ManifestOutcome::Missing { .. }) {
        println!();
        println!("=== Evaluating manifest: {} ===", outcome.path().display());
    }

    match outcome {
        ManifestOutcome::Missing { path } => {
            println!("WARNING: manifest does not exist: {}", path.display());
        }
        ManifestOutcome::Skipped { key, .. } => {
            println!("Skipping: already have a successful CE run for {}", key);
        }
        ManifestOutcome::Evaluated { key, verdict, .. } => {
            if verdict.passed {
                println!("[PASS] {}", key);
            } else {
                println!("[FAIL] {}", key);
                for reason in &verdict.reasons {
                    println!("  - {}", reason);
                }
            }
        }
        ManifestOutcome::Errored { message, .. } => {
            println!("[ERROR] {}", message);
        }
    }
}

fn print_summary(report: &BatchReport) {
    let total = report.manifests.len();
    let skipped = report
        .manifests
        .iter()
        .filter(|o| matches!(o, ManifestOutcome::Skipped { .. }))
        .count();
    let missing = report
        .manifests
        .iter()
        .filter(|o| matches!(o, ManifestOutcome::Missing { .. }))
        .count();

    println!();
    println!(
        "{} manifest(s): {} skipped, {} missing, {} gate failure(s), {} error(s)",
        total,
        skipped,
        missing,
        report.gate_failures(),
        report.errors()
    );
}
