//! Model manifests
//!
//! A manifest is a YAML document naming one evaluable model build and the
//! gate policy it must satisfy:
//!
//! ```yaml
//! model_id: m1
//! version: "1.0"
//! evaluation_profile: p1
//! gate:
//!   min_overall_score: 0.75
//!   min_group_score: 0.70
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CeError, Result};
use crate::key::{EvalKey, KEY_SEPARATOR};

/// Gate thresholds for one model.
///
/// Both thresholds default to 0.0, which lets every non-negative score pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Minimum acceptable aggregate score
    pub min_overall_score: f64,
    /// Minimum acceptable score for every reported subgroup
    pub min_group_score: f64,
}

impl GateConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        for (name, value) in [
            ("min_overall_score", self.min_overall_score),
            ("min_group_score", self.min_group_score),
        ] {
            if !value.is_finite() {
                return Err(format!("gate.{name} must be a finite number (got {value})"));
            }
        }
        Ok(())
    }
}

/// Identity and policy for one evaluated artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Stable identifier of the model family
    pub model_id: String,
    /// Specific build/release
    pub version: String,
    /// Evaluation suite/config that applies
    pub evaluation_profile: String,
    /// Gate thresholds (optional in the manifest)
    #[serde(default)]
    pub gate: GateConfig,
}

impl ModelDescriptor {
    /// Create a descriptor with the default (always-pass) gate
    pub fn new(
        model_id: impl Into<String>,
        version: impl Into<String>,
        evaluation_profile: impl Into<String>,
    ) -> Self {
        ModelDescriptor {
            model_id: model_id.into(),
            version: version.into(),
            evaluation_profile: evaluation_profile.into(),
            gate: GateConfig::default(),
        }
    }

    /// Replace the gate thresholds
    pub fn with_gate(mut self, min_overall_score: f64, min_group_score: f64) -> Self {
        self.gate = GateConfig {
            min_overall_score,
            min_group_score,
        };
        self
    }

    /// Load and validate a manifest from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CeError::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)
            .map_err(|e| CeError::io_operation("read manifest", path.display(), e))?;
        Self::parse(&content, path)
    }

    /// Parse and validate manifest content; `path` is only used in errors
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let descriptor: ModelDescriptor = serde_yaml::from_str(content)
            .map_err(|e| CeError::invalid_manifest(path, e))?;
        descriptor
            .validate()
            .map_err(|reason| CeError::invalid_manifest(path, reason))?;
        Ok(descriptor)
    }

    /// Check required fields and thresholds
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, value) in [
            ("model_id", &self.model_id),
            ("version", &self.version),
            ("evaluation_profile", &self.evaluation_profile),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{name} must not be empty"));
            }
            if value.contains(KEY_SEPARATOR) {
                return Err(format!(
                    "{name} must not contain {KEY_SEPARATOR:?} (got {value:?})"
                ));
            }
            if !is_key_field(value) {
                return Err(format!(
                    "{name} must use only letters, digits, '.', '-' and '_', \
                     starting and ending with a letter or digit (got {value:?})"
                ));
            }
        }
        self.gate.validate()
    }

    /// Identity key of this descriptor
    pub fn key(&self) -> EvalKey {
        EvalKey::build(self)
    }

    /// File-name stem shared by this descriptor's artifacts.
    ///
    /// Fields are joined with `_`; an `_` inside a field is doubled, so
    /// distinct keys never share a stem.
    pub fn artifact_stem(&self) -> String {
        [&self.model_id, &self.version, &self.evaluation_profile]
            .iter()
            .map(|field| field.replace('_', "__"))
            .collect::<Vec<_>>()
            .join("_")
    }
}

/// Key fields double as file-name components: no `:`, no path separators,
/// and no leading or trailing `.`, `-` or `_`.
fn is_key_field(value: &str) -> bool {
    let edge_ok = |c: Option<char>| c.is_some_and(char::is_alphanumeric);
    edge_ok(value.chars().next())
        && edge_ok(value.chars().last())
        && value
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_'))
}
