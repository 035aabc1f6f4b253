//! Gatekeeper: threshold comparison of metrics against a model's policy

use serde::{Deserialize, Serialize};

use crate::manifest::ModelDescriptor;
use crate::metrics::MetricsResult;

/// Outcome of gating one metrics result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub passed: bool,
    /// Human-readable failure reasons; empty iff `passed`
    pub reasons: Vec<String>,
}

impl Verdict {
    pub fn pass() -> Self {
        Verdict {
            passed: true,
            reasons: Vec::new(),
        }
    }

    /// Verdict that passes exactly when there are no reasons
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        Verdict {
            passed: reasons.is_empty(),
            reasons,
        }
    }
}

/// Compare `metrics` against the descriptor's gate thresholds.
///
/// A score equal to its threshold passes. A non-finite score always fails.
/// Group reasons follow group-name order, so the result is deterministic for
/// a given input.
pub fn evaluate(descriptor: &ModelDescriptor, metrics: &MetricsResult) -> Verdict {
    let gate = &descriptor.gate;
    let mut reasons = Vec::new();

    if !metrics.overall_score.is_finite() {
        reasons.push(format!(
            "overall_score {} is not a finite number",
            metrics.overall_score
        ));
    } else if metrics.overall_score < gate.min_overall_score {
        reasons.push(format!(
            "overall_score {:.3} < min_overall_score {:.3}",
            metrics.overall_score, gate.min_overall_score
        ));
    }

    // group_scores is a BTreeMap: iteration is lexicographic by group name
    for (group, score) in &metrics.group_scores {
        if !score.is_finite() {
            reasons.push(format!("group {} score {} is not a finite number", group, score));
        } else if *score < gate.min_group_score {
            reasons.push(format!(
                "group {} score {:.3} < min_group_score {:.3}",
                group, score, gate.min_group_score
            ));
        }
    }

    Verdict::from_reasons(reasons)
}
