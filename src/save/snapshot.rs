//! Inventory snapshot save/load
//!
//! A snapshot holds one player inventory and the items that were dropped
//! because they no longer fit.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::items::{Inventory, Item, OverflowSink};

/// Snapshot file version for compatibility checking
pub const SNAPSHOT_VERSION: u32 = 1;

/// Complete snapshot file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotData {
    pub version: u32,
    pub inventory: Inventory,
    /// Items that overflowed a consolidation pass
    #[serde(default)]
    pub dropped: Vec<Item>,
}

impl SnapshotData {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            inventory,
            dropped: Vec::new(),
        }
    }
}

impl OverflowSink for SnapshotData {
    fn accept(&mut self, item: Item) {
        self.dropped.push(item);
    }
}

/// Snapshot error types
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Snapshot version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Write a snapshot to `path`
pub fn save_snapshot(snapshot: &SnapshotData, path: &Path) -> Result<(), SnapshotError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;

    log::info!("Snapshot saved to {}", path.display());
    Ok(())
}

/// Read a snapshot from `path`
pub fn load_snapshot(path: &Path) -> Result<SnapshotData, SnapshotError> {
    let data = fs::read_to_string(path)?;
    let snapshot: SnapshotData = serde_json::from_str(&data)?;

    // Version check
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::VersionMismatch {
            expected: SNAPSHOT_VERSION,
            found: snapshot.version,
        });
    }

    log::info!("Snapshot loaded from {}", path.display());
    Ok(snapshot)
}
