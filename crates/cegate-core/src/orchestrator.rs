//! Batch orchestration
//!
//! One run loads the history once, evaluates each manifest in input order,
//! and saves the history once at the end. A manifest whose key already has a
//! passing entry is skipped without calling the metrics provider or touching
//! its entry.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::artifacts::ArtifactWriter;
use crate::error::Result;
use crate::gate::{self, Verdict};
use crate::history::{History, HistoryEntry, HistoryStatus, HistoryStore};
use crate::key::EvalKey;
use crate::manifest::ModelDescriptor;
use crate::metrics::MetricsProvider;
use crate::trace_time;

/// What happened to one manifest in a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ManifestOutcome {
    /// The manifest file does not exist; excluded from aggregation
    Missing { path: PathBuf },
    /// The key already has a passing entry; not re-evaluated
    Skipped { path: PathBuf, key: EvalKey },
    /// Evaluated and recorded in history
    Evaluated {
        path: PathBuf,
        key: EvalKey,
        verdict: Verdict,
        entry: HistoryEntry,
    },
    /// The manifest could not be evaluated; history untouched
    Errored {
        path: PathBuf,
        error_type: String,
        message: String,
    },
}

impl ManifestOutcome {
    pub fn path(&self) -> &Path {
        match self {
            ManifestOutcome::Missing { path }
            | ManifestOutcome::Skipped { path, .. }
            | ManifestOutcome::Evaluated { path, .. }
            | ManifestOutcome::Errored { path, .. } => path,
        }
    }

    /// False only for gate failures and errors
    pub fn is_ok(&self) -> bool {
        match self {
            ManifestOutcome::Missing { .. } | ManifestOutcome::Skipped { .. } => true,
            ManifestOutcome::Evaluated { verdict, .. } => verdict.passed,
            ManifestOutcome::Errored { .. } => false,
        }
    }
}

/// Result of one batch run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub manifests: Vec<ManifestOutcome>,
}

impl BatchReport {
    /// True iff no manifest failed its gate or errored
    pub fn passed(&self) -> bool {
        self.manifests.iter().all(ManifestOutcome::is_ok)
    }

    /// Number of manifests that failed their gate
    pub fn gate_failures(&self) -> usize {
        self.manifests
            .iter()
            .filter(|o| matches!(o, ManifestOutcome::Evaluated { verdict, .. } if !verdict.passed))
            .count()
    }

    /// Number of manifests that could not be evaluated
    pub fn errors(&self) -> usize {
        self.manifests
            .iter()
            .filter(|o| matches!(o, ManifestOutcome::Errored { .. }))
            .count()
    }

    /// Batch summary as `{"passed": bool, "manifests": [...]}`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "passed": self.passed(),
            "manifests": self.manifests,
        })
    }
}

/// Drives evaluation cycles over a batch of manifests
pub struct Orchestrator<'a> {
    store: HistoryStore,
    provider: &'a dyn MetricsProvider,
    writer: &'a dyn ArtifactWriter,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        store: HistoryStore,
        provider: &'a dyn MetricsProvider,
        writer: &'a dyn ArtifactWriter,
    ) -> Self {
        Orchestrator {
            store,
            provider,
            writer,
        }
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Run the batch without per-manifest notifications
    pub fn run(&self, manifests: &[PathBuf]) -> Result<BatchReport> {
        self.run_with(manifests, |_| {})
    }

    /// Run the batch, calling `on_outcome` as each manifest completes.
    ///
    /// A corrupt history store aborts before any manifest is processed.
    /// Per-manifest failures are reported as [`ManifestOutcome::Errored`]
    /// and the batch continues.
    pub fn run_with(
        &self,
        manifests: &[PathBuf],
        mut on_outcome: impl FnMut(&ManifestOutcome),
    ) -> Result<BatchReport> {
        let start = Instant::now();
        let mut history = self.store.load()?;
        trace_time!(start, "load_history");

        let mut report = BatchReport::default();
        for path in manifests {
            let outcome = self.process(path, &mut history);
            on_outcome(&outcome);
            report.manifests.push(outcome);
        }

        self.store.save(&history)?;
        trace_time!(start, "run_batch");
        info!(
            manifests = report.manifests.len(),
            gate_failures = report.gate_failures(),
            errors = report.errors(),
            passed = report.passed(),
            "batch_complete"
        );
        Ok(report)
    }

    /// Process one manifest against the in-memory history
    pub fn process(&self, path: &Path, history: &mut History) -> ManifestOutcome {
        if !path.exists() {
            warn!(path = %path.display(), "manifest does not exist");
            return ManifestOutcome::Missing {
                path: path.to_path_buf(),
            };
        }

        match self.evaluate_manifest(path, history) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "manifest_failed");
                ManifestOutcome::Errored {
                    path: path.to_path_buf(),
                    error_type: e.error_type().to_string(),
                    message: e.to_string(),
                }
            }
        }
    }

    fn evaluate_manifest(&self, path: &Path, history: &mut History) -> Result<ManifestOutcome> {
        let start = Instant::now();
        let descriptor = ModelDescriptor::load(path)?;
        let key = descriptor.key();

        if history.has_pass(&key) {
            info!(key = %key, "skip_already_passed");
            return Ok(ManifestOutcome::Skipped {
                path: path.to_path_buf(),
                key,
            });
        }

        debug!(key = %key, provider = self.provider.name(), "evaluate");
        let metrics = self.provider.evaluate(&descriptor)?;
        let verdict = gate::evaluate(&descriptor, &metrics);
        let artifacts = self.writer.write(&descriptor, &metrics, &verdict)?;

        let entry = HistoryEntry {
            created_at: Utc::now(),
            metrics_path: artifacts.metrics_path,
            reasons: verdict.reasons.clone(),
            report_path: artifacts.report_path,
            status: if verdict.passed {
                HistoryStatus::Pass
            } else {
                HistoryStatus::FailedGate
            },
        };
        if let Some(previous) = history.upsert(key.clone(), entry.clone()) {
            debug!(key = %key, previous = %previous.status, "history_entry_replaced");
        }

        trace_time!(start, "evaluate_manifest", key = key.as_str());
        info!(key = %key, status = %entry.status, "evaluated");
        Ok(ManifestOutcome::Evaluated {
            path: path.to_path_buf(),
            key,
            verdict,
            entry,
        })
    }
}
