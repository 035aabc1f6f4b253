//! Durable pass/fail history keyed by evaluation identity
//!
//! The store is a single pretty-printed JSON object mapping each key to its
//! latest [`HistoryEntry`]. Keys are written in sorted order so saving the
//! same history twice yields identical bytes.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CeError, Result};
use crate::key::EvalKey;

/// Recorded outcome of an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryStatus {
    Pass,
    FailedGate,
}

impl HistoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryStatus::Pass => "pass",
            HistoryStatus::FailedGate => "failed_gate",
        }
    }
}

impl fmt::Display for HistoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HistoryStatus {
    type Err = CeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pass" => Ok(HistoryStatus::Pass),
            "failed_gate" => Ok(HistoryStatus::FailedGate),
            other => Err(CeError::invalid_value("history status", other)),
        }
    }
}

/// Persisted record for one key.
///
/// Fields are declared in alphabetical order to keep the JSON layout sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When this entry was recorded (UTC)
    pub created_at: DateTime<Utc>,
    /// Location of the metrics document
    pub metrics_path: String,
    /// Gate failure reasons; empty when `status` is `pass`
    #[serde(default)]
    pub reasons: Vec<String>,
    /// Location of the report document
    pub report_path: String,
    pub status: HistoryStatus,
}

impl HistoryEntry {
    pub fn is_pass(&self) -> bool {
        self.status == HistoryStatus::Pass
    }
}

/// In-memory history: at most one entry per key, latest write wins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: BTreeMap<EvalKey, HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &EvalKey) -> Option<&HistoryEntry> {
        self.entries.get(key)
    }

    /// True if `key` has a recorded passing evaluation
    pub fn has_pass(&self, key: &EvalKey) -> bool {
        self.get(key).is_some_and(HistoryEntry::is_pass)
    }

    /// Insert or replace the entry for `key`, returning the previous entry
    pub fn upsert(&mut self, key: EvalKey, entry: HistoryEntry) -> Option<HistoryEntry> {
        self.entries.insert(key, entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&EvalKey, &HistoryEntry)> {
        self.entries.iter()
    }
}

/// File-backed history store.
///
/// Single writer per run; there is no locking.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HistoryStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full history.
    ///
    /// A missing or blank file yields an empty history. Anything else that
    /// does not parse is [`CeError::CorruptHistory`].
    pub fn load(&self) -> Result<History> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "history_absent");
            return Ok(History::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| CeError::io_operation("read history", self.path.display(), e))?;
        if content.trim().is_empty() {
            debug!(path = %self.path.display(), "history_blank");
            return Ok(History::new());
        }

        let history: History =
            serde_json::from_str(&content).map_err(|e| CeError::CorruptHistory {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        debug!(entries = history.len(), "history_loaded");
        Ok(history)
    }

    /// Replace the stored history with `history`.
    ///
    /// Writes to a sibling temp file and renames it over the store.
    pub fn save(&self, history: &History) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    CeError::io_operation("create history directory", parent.display(), e)
                })?;
            }
        }

        let temp_path = self.temp_path();
        {
            let mut writer = BufWriter::new(File::create(&temp_path).map_err(|e| {
                CeError::io_operation("create history file", temp_path.display(), e)
            })?);
            serde_json::to_writer_pretty(&mut writer, history)?;
            writeln!(writer)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, &self.path)
            .map_err(|e| CeError::io_operation("replace history", self.path.display(), e))?;
        debug!(entries = history.len(), path = %self.path.display(), "history_saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "history.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
