//! JSON-file snapshot gateway implementation.

use super::{Snapshot, SnapshotResult, SnapshotStore};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed snapshot store using one JSON document for the full state.
pub struct JsonFileSnapshot {
    path: PathBuf,
}

impl JsonFileSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileSnapshot {
    fn load(&self) -> SnapshotResult<Snapshot> {
        if !self.path.exists() {
            info!("event=snapshot_load module=snapshot status=empty");
            return Ok(Snapshot::default());
        }

        let raw = fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        info!(
            "event=snapshot_load module=snapshot status=ok accounts={} communities={}",
            snapshot.accounts.len(),
            snapshot.communities.len()
        );
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> SnapshotResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let encoded = serde_json::to_string(snapshot)?;
        fs::write(&self.path, encoded)?;
        info!(
            "event=snapshot_save module=snapshot status=ok accounts={} communities={}",
            snapshot.accounts.len(),
            snapshot.communities.len()
        );
        Ok(())
    }
}
