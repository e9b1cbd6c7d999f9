use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::snapshot::{GameSnapshot, RoundSnapshot};

/// Current on-disk snapshot format.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot not found: {0}")]
    NotFound(String),
    #[error("invalid snapshot id: {0:?}")]
    InvalidId(String),
    #[error("unsupported snapshot format version {found} (max {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("snapshot I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("snapshot timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

/// Either kind of snapshot a store can hold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Snapshot {
    Game(GameSnapshot),
    Round(RoundSnapshot),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotKind {
    Game,
    Round,
}

impl Snapshot {
    pub fn kind(&self) -> SnapshotKind {
        match self {
            Snapshot::Game(_) => SnapshotKind::Game,
            Snapshot::Round(_) => SnapshotKind::Round,
        }
    }

    fn game(&self) -> &GameSnapshot {
        match self {
            Snapshot::Game(game) => game,
            Snapshot::Round(round) => &round.game,
        }
    }

    /// Rounds completed, or the round in progress.
    pub fn round_number(&self) -> u32 {
        match self {
            Snapshot::Game(game) => game.round_counter,
            Snapshot::Round(round) => round.round_no,
        }
    }

    pub fn player_names(&self) -> Vec<String> {
        self.game().players.iter().map(|p| p.name.clone()).collect()
    }
}

impl From<GameSnapshot> for Snapshot {
    fn from(snapshot: GameSnapshot) -> Self {
        Snapshot::Game(snapshot)
    }
}

impl From<RoundSnapshot> for Snapshot {
    fn from(snapshot: RoundSnapshot) -> Self {
        Snapshot::Round(snapshot)
    }
}

/// Summary shown when listing saves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    pub id: String,
    pub kind: SnapshotKind,
    pub round: u32,
    pub players: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
}

impl SnapshotInfo {
    pub fn describe(id: &str, snapshot: &Snapshot, saved_at: Option<String>) -> Self {
        Self {
            id: id.to_string(),
            kind: snapshot.kind(),
            round: snapshot.round_number(),
            players: snapshot.player_names(),
            saved_at,
        }
    }
}

/// External persistence provider. Whatever it writes must read back equal.
pub trait SnapshotStore {
    /// Identifiers in a stable order.
    fn list_snapshots(&self) -> Result<Vec<String>, StoreError>;

    fn read_snapshot(&self, id: &str) -> Result<Snapshot, StoreError>;

    /// Persist and return the new identifier.
    fn write_snapshot(&mut self, snapshot: &Snapshot) -> Result<String, StoreError>;

    fn delete_snapshot(&mut self, id: &str) -> Result<(), StoreError>;

    fn snapshot_info(&self, id: &str) -> Result<SnapshotInfo, StoreError> {
        let snapshot = self.read_snapshot(id)?;
        Ok(SnapshotInfo::describe(id, &snapshot, None))
    }
}
