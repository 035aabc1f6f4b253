//! Error types and exit codes for cegate
//!
//! Exit codes:
//! - 0: Success (every evaluated manifest passed or was already passed)
//! - 1: Gate failure or generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (corrupt history, invalid manifest, invalid config)

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Gate failure or generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - corrupt history, invalid manifest or config (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during cegate operations
#[derive(Error, Debug)]
pub enum CeError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("manifest does not exist: {path:?}")]
    ManifestNotFound { path: PathBuf },

    #[error("invalid manifest {path:?}: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },

    #[error("corrupt history store {path:?}: {reason}")]
    CorruptHistory { path: PathBuf, reason: String },

    #[error("invalid config {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("batch failed: {gate_failures} gate failure(s), {errors} manifest error(s)")]
    BatchFailed { gate_failures: usize, errors: usize },

    #[error("metrics provider failed for {key}: {reason}")]
    MetricsProvider { key: String, reason: String },

    #[error("artifact writer failed for {key}: {reason}")]
    ArtifactWriter { key: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },
}

impl CeError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        CeError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        CeError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        CeError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a manifest that failed validation
    pub fn invalid_manifest(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        CeError::InvalidManifest {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an error for a failed metrics provider call
    pub fn metrics_provider(key: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        CeError::MetricsProvider {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an error for a failed artifact writer call
    pub fn artifact_writer(key: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        CeError::ArtifactWriter {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CeError::UsageError(_) | CeError::InvalidValue { .. } => ExitCode::Usage,

            CeError::ManifestNotFound { .. }
            | CeError::InvalidManifest { .. }
            | CeError::CorruptHistory { .. }
            | CeError::InvalidConfig { .. }
            | CeError::NotFound { .. } => ExitCode::Data,

            CeError::BatchFailed { .. }
            | CeError::MetricsProvider { .. }
            | CeError::ArtifactWriter { .. }
            | CeError::Io(_)
            | CeError::Yaml(_)
            | CeError::Json(_)
            | CeError::Toml(_)
            | CeError::FailedOperationWithTarget { .. } => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            CeError::UsageError(_) => "usage_error",
            CeError::InvalidValue { .. } => "invalid_value",
            CeError::ManifestNotFound { .. } => "manifest_not_found",
            CeError::InvalidManifest { .. } => "invalid_manifest",
            CeError::CorruptHistory { .. } => "corrupt_history",
            CeError::InvalidConfig { .. } => "invalid_config",
            CeError::NotFound { .. } => "not_found",
            CeError::BatchFailed { .. } => "batch_failed",
            CeError::MetricsProvider { .. } => "metrics_provider",
            CeError::ArtifactWriter { .. } => "artifact_writer",
            CeError::Io(_) => "io_error",
            CeError::Yaml(_) => "yaml_error",
            CeError::Json(_) => "json_error",
            CeError::Toml(_) => "toml_error",
            CeError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for cegate operations
pub type Result<T> = std::result::Result<T, CeError>;
