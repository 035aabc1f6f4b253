//! Metrics providers
//!
//! The gate never computes metrics itself. A [`MetricsProvider`] turns a
//! [`ModelDescriptor`] into a [`MetricsResult`]; the evaluation framework
//! behind it is swappable.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CeError, Result};
use crate::manifest::ModelDescriptor;

/// Structured output of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    /// Aggregate score, nominally in [0, 1]
    pub overall_score: f64,
    /// Score per evaluation subgroup
    #[serde(default)]
    pub group_scores: BTreeMap<String, f64>,
    /// Informational metrics, never gated on directly
    #[serde(default)]
    pub raw_metrics: BTreeMap<String, f64>,
}

impl MetricsResult {
    pub fn new(overall_score: f64) -> Self {
        MetricsResult {
            overall_score,
            group_scores: BTreeMap::new(),
            raw_metrics: BTreeMap::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>, score: f64) -> Self {
        self.group_scores.insert(group.into(), score);
        self
    }

    pub fn with_raw(mut self, name: impl Into<String>, value: f64) -> Self {
        self.raw_metrics.insert(name.into(), value);
        self
    }
}

/// Capability that evaluates a model and reports its metrics
pub trait MetricsProvider {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Evaluate the described model
    fn evaluate(&self, descriptor: &ModelDescriptor) -> Result<MetricsResult>;
}

/// Demo provider with fixed scores chosen by version suffix.
///
/// Versions ending in `0` score well enough to pass a typical gate; any
/// other version scores below it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubMetricsProvider;

impl MetricsProvider for StubMetricsProvider {
    fn name(&self) -> &str {
        "stub"
    }

    fn evaluate(&self, descriptor: &ModelDescriptor) -> Result<MetricsResult> {
        let (overall_score, group_a) = if descriptor.version.ends_with('0') {
            (0.80, 0.78)
        } else {
            (0.72, 0.68)
        };

        Ok(MetricsResult::new(overall_score)
            .with_group("group_a", group_a)
            .with_group("group_b", group_a + 0.02)
            .with_raw("demographic_parity", 0.81)
            .with_raw("equal_selection_parity", 0.76))
    }
}

/// Provider that reads precomputed metrics from `<dir>/<stem>.json`,
/// where `<stem>` is `model_id_version_evaluation_profile`.
#[derive(Debug, Clone)]
pub struct DirMetricsProvider {
    dir: PathBuf,
}

impl DirMetricsProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirMetricsProvider { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the metrics file for a descriptor
    pub fn metrics_file(&self, descriptor: &ModelDescriptor) -> PathBuf {
        self.dir
            .join(format!("{}.json", descriptor.artifact_stem()))
    }
}

impl MetricsProvider for DirMetricsProvider {
    fn name(&self) -> &str {
        "dir"
    }

    fn evaluate(&self, descriptor: &ModelDescriptor) -> Result<MetricsResult> {
        let key = descriptor.key();
        let path = self.metrics_file(descriptor);
        debug!(path = %path.display(), key = %key, "read_metrics_file");

        let content = fs::read_to_string(&path).map_err(|e| {
            CeError::metrics_provider(&key, format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            CeError::metrics_provider(&key, format!("cannot parse {}: {}", path.display(), e))
        })
    }
}
