//! Event store adapters
//!
//! The analytics engine never reads storage itself. An [`EventStore`] hands
//! it a complete [`Snapshot`] for each invocation; the engine treats that
//! snapshot as read-only and does not validate it.

use crate::error::Result;
use crate::types::Snapshot;
use std::path::{Path, PathBuf};

/// Source of habits, routines, completions and moods.
pub trait EventStore {
    /// Short name for logs (e.g. "sqlite", "json").
    fn name(&self) -> &str;

    /// Load everything the engine needs.
    fn load_snapshot(&self) -> Result<Snapshot>;
}

/// Snapshot stored as a single JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a snapshot to `path` as pretty-printed JSON.
    pub fn save(path: &Path, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl EventStore for JsonSnapshotStore {
    fn name(&self) -> &str {
        "json"
    }

    fn load_snapshot(&self) -> Result<Snapshot> {
        let content = std::fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;

        tracing::debug!(
            path = %self.path.display(),
            habits = snapshot.habits.len(),
            routines = snapshot.routines.len(),
            moods = snapshot.moods.len(),
            "Loaded JSON snapshot"
        );

        Ok(snapshot)
    }
}
