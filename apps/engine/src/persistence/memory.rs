use std::collections::BTreeMap;

use tracing::debug;

use super::store::{Snapshot, SnapshotStore, StoreError};

/// In-process store; ids are `mem-<n>` in write order.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    next: u64,
    entries: BTreeMap<u64, Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(id: &str) -> Result<u64, StoreError> {
        id.strip_prefix("mem-")
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| StoreError::InvalidId(id.to_string()))
    }
}

impl SnapshotStore for MemoryStore {
    fn list_snapshots(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.keys().map(|n| format!("mem-{n}")).collect())
    }

    fn read_snapshot(&self, id: &str) -> Result<Snapshot, StoreError> {
        self.entries
            .get(&Self::key(id)?)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn write_snapshot(&mut self, snapshot: &Snapshot) -> Result<String, StoreError> {
        self.next += 1;
        self.entries.insert(self.next, snapshot.clone());
        let id = format!("mem-{}", self.next);
        debug!(%id, kind = ?snapshot.kind(), "snapshot stored in memory");
        Ok(id)
    }

    fn delete_snapshot(&mut self, id: &str) -> Result<(), StoreError> {
        self.entries
            .remove(&Self::key(id)?)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
