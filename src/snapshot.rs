//! Local snapshot of the last classification run.
//!
//! Two entries live under the snapshot directory: `last_run_at`, the
//! formatted time of the last successful run, and `last.json`, the full
//! response body of that run. Together they let the dashboard come back up
//! without a network call.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{AutoclassError, Result};
use crate::paths;
use crate::payload::ClassificationResult;

const LAST_RUN_AT_FILE: &str = "last_run_at";
const LAST_PAYLOAD_FILE: &str = "last.json";

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the default snapshot directory.
    pub fn open_default() -> Self {
        Self::new(paths::snapshot_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn last_run_at_path(&self) -> PathBuf {
        self.dir.join(LAST_RUN_AT_FILE)
    }

    fn payload_path(&self) -> PathBuf {
        self.dir.join(LAST_PAYLOAD_FILE)
    }

    /// Persist a successful run: its label and the raw response body.
    pub fn save(&self, payload: &Value, last_run_at: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AutoclassError::Io(io::Error::new(
                e.kind(),
                format!(
                    "Failed to create snapshot directory {}: {}",
                    self.dir.display(),
                    e
                ),
            ))
        })?;
        fs::write(self.last_run_at_path(), last_run_at)?;
        fs::write(self.payload_path(), serde_json::to_string(payload)?)?;
        tracing::debug!(dir = %self.dir.display(), "saved classification snapshot");
        Ok(())
    }

    /// Last-run label, if one was saved.
    pub fn last_run_at(&self) -> Option<String> {
        let raw = fs::read_to_string(self.last_run_at_path()).ok()?;
        let label = raw.trim();
        (!label.is_empty()).then(|| label.to_string())
    }

    /// Raw saved payload. Missing is `Ok(None)`; unreadable or corrupt JSON
    /// is an error.
    pub fn load_payload(&self) -> Result<Option<Value>> {
        let content = match fs::read_to_string(self.payload_path()) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Saved payload decoded for display. Any failure is logged and reads as
    /// no snapshot.
    pub fn restore(&self) -> Option<ClassificationResult> {
        let value = match self.load_payload() {
            Ok(value) => value?,
            Err(e) => {
                tracing::warn!(error = %e, "failed to restore classification snapshot");
                return None;
            }
        };
        match serde_json::from_value(value) {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::warn!(error = %e, "classification snapshot has an unexpected shape");
                None
            }
        }
    }

    /// Remove both entries. Missing entries are not an error.
    pub fn clear(&self) -> Result<()> {
        for path in [self.payload_path(), self.last_run_at_path()] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}
