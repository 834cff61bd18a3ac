//! Snapshot files
//!
//! Inventories are saved to and loaded from versioned JSON files.

pub mod snapshot;

pub use snapshot::{
    SnapshotData, SnapshotError,
    save_snapshot, load_snapshot, SNAPSHOT_VERSION,
};
