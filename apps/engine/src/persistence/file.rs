use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use super::store::{Snapshot, SnapshotInfo, SnapshotStore, StoreError, FORMAT_VERSION};
use crate::config::GameConfig;

pub const SNAPSHOT_EXTENSION: &str = "jest";

const DEFAULT_LABEL: &str = "jest";

/// On-disk wrapper around a snapshot.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    format_version: u32,
    saved_at: String,
    snapshot: Snapshot,
}

/// One pretty-printed JSON file per snapshot under `dir`, named
/// `<label>_<UTC timestamp>.jest`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    label: String,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            label: DEFAULT_LABEL.to_string(),
        }
    }

    /// Store rooted at the configured save directory.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.save_dir.clone())
    }

    /// Prefix for new snapshot ids; reduced to `[A-Za-z0-9_-]`.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = sanitize(label);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.dir.join(format!("{id}.{SNAPSHOT_EXTENSION}")))
    }

    fn read_envelope(&self, id: &str) -> Result<Envelope, StoreError> {
        let path = self.path_for(id)?;
        let text = fs::read_to_string(&path).map_err(|e| not_found_or(e, id))?;
        let envelope: Envelope = serde_json::from_str(&text)?;
        if envelope.format_version > FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: envelope.format_version,
                supported: FORMAT_VERSION,
            });
        }
        Ok(envelope)
    }

    /// First free id for the current second.
    fn fresh_id(&self, stamp: &str) -> String {
        let base = format!("{}_{stamp}", self.label);
        let mut id = base.clone();
        let mut n = 1;
        while self.dir.join(format!("{id}.{SNAPSHOT_EXTENSION}")).exists() {
            n += 1;
            id = format!("{base}-{n}");
        }
        id
    }
}

impl SnapshotStore for FileStore {
    fn list_snapshots(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn read_snapshot(&self, id: &str) -> Result<Snapshot, StoreError> {
        Ok(self.read_envelope(id)?.snapshot)
    }

    fn write_snapshot(&mut self, snapshot: &Snapshot) -> Result<String, StoreError> {
        fs::create_dir_all(&self.dir)?;
        let now = OffsetDateTime::now_utc();
        let stamp = now.format(format_description!("[year][month][day]_[hour][minute][second]"))?;
        let saved_at = now.format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second]Z"
        ))?;

        let id = self.fresh_id(&stamp);
        let path = self.path_for(&id)?;
        let envelope = Envelope {
            format_version: FORMAT_VERSION,
            saved_at,
            snapshot: snapshot.clone(),
        };
        fs::write(&path, serde_json::to_string_pretty(&envelope)?)?;
        info!(%id, path = %path.display(), kind = ?snapshot.kind(), "snapshot saved");
        Ok(id)
    }

    fn delete_snapshot(&mut self, id: &str) -> Result<(), StoreError> {
        let path = self.path_for(id)?;
        fs::remove_file(&path).map_err(|e| not_found_or(e, id))?;
        debug!(%id, "snapshot deleted");
        Ok(())
    }

    fn snapshot_info(&self, id: &str) -> Result<SnapshotInfo, StoreError> {
        let envelope = self.read_envelope(id)?;
        Ok(SnapshotInfo::describe(
            id,
            &envelope.snapshot,
            Some(envelope.saved_at),
        ))
    }
}

fn not_found_or(err: std::io::Error, id: &str) -> StoreError {
    if err.kind() == ErrorKind::NotFound {
        StoreError::NotFound(id.to_string())
    } else {
        warn!(%id, error = %err, "snapshot file access failed");
        StoreError::Io(err)
    }
}

fn sanitize(label: &str) -> String {
    let cleaned: String = label
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        DEFAULT_LABEL.to_string()
    } else {
        cleaned
    }
}
