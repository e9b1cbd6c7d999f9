//! Snapshot persistence behind the `SnapshotStore` seam.

mod file;
mod memory;
mod store;

pub use file::{FileStore, SNAPSHOT_EXTENSION};
pub use memory::MemoryStore;
pub use store::{Snapshot, SnapshotInfo, SnapshotKind, SnapshotStore, StoreError, FORMAT_VERSION};
