//! Path resolution utilities for CLI commands

use std::env;
use std::path::{Path, PathBuf};

/// Resolve the root directory that relative manifest, config, history and
/// report paths are anchored to.
///
/// If a root path is provided, returns it. Otherwise, falls back to the
/// current working directory, or "." if that cannot be determined.
pub fn resolve_root_path(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Resolve each manifest argument against `root`, keeping input order.
pub fn resolve_manifest_paths(root: &Path, manifests: &[PathBuf]) -> Vec<PathBuf> {
    manifests
        .iter()
        .map(|m| cegate_core::config::resolve(root, m))
        .collect()
}
