//! Gate configuration
//!
//! Optional `cegate.toml` at the root directory:
//!
//! ```toml
//! history_path = "ce_history/ce_history.json"
//! reports_dir = "reports"
//! # metrics_dir = "metrics"
//! ```
//!
//! Relative paths resolve against the root directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CeError, Result};

/// Default config file name, looked up in the root directory
pub const CONFIG_FILE: &str = "cegate.toml";

/// Default history store location
pub const DEFAULT_HISTORY_PATH: &str = "ce_history/ce_history.json";

/// Default reports directory
pub const DEFAULT_REPORTS_DIR: &str = "reports";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CeConfig {
    /// History store file
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,

    /// Directory receiving metrics and report artifacts
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,

    /// Directory of precomputed metrics; the stub provider is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics_dir: Option<PathBuf>,
}

fn default_history_path() -> PathBuf {
    PathBuf::from(DEFAULT_HISTORY_PATH)
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from(DEFAULT_REPORTS_DIR)
}

impl Default for CeConfig {
    fn default() -> Self {
        CeConfig {
            history_path: default_history_path(),
            reports_dir: default_reports_dir(),
            metrics_dir: None,
        }
    }
}

impl CeConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CeError::io_operation("read config", path.display(), e))?;
        toml::from_str(&content).map_err(|e| CeError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load `path` if given, else `<root>/cegate.toml` if present, else defaults.
    ///
    /// An explicitly named file must exist.
    pub fn discover(root: &Path, path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let resolved = resolve(root, path);
                if !resolved.exists() {
                    return Err(CeError::not_found("config file", resolved.display()));
                }
                Self::load(&resolved)
            }
            None => {
                let default = root.join(CONFIG_FILE);
                if default.exists() {
                    Self::load(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Make every configured path absolute against `root`
    pub fn resolve_paths(mut self, root: &Path) -> Self {
        self.history_path = resolve(root, &self.history_path);
        self.reports_dir = resolve(root, &self.reports_dir);
        self.metrics_dir = self.metrics_dir.map(|dir| resolve(root, &dir));
        self
    }
}

/// Join `path` onto `root` unless it is already absolute
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
