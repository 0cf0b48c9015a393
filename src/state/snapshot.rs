// ABOUTME: Durable snapshot of the last file state accepted by the remote service
// Reads and atomically replaces the JSON snapshot kept in the project control directory

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::{FileState, StateError};

/// File name of the snapshot inside the control directory.
pub const SNAPSHOT_FILE: &str = "file_info";

pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store located in the given control directory.
    pub fn in_control_dir(control_dir: &Path) -> Self {
        Self::new(control_dir.join(SNAPSHOT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the last committed state.
    pub fn load(&self) -> Result<FileState, StateError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StateError::SnapshotMissing(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        let state: FileState =
            serde_json::from_str(&content).map_err(|source| StateError::SnapshotCorrupt {
                path: self.path.clone(),
                source,
            })?;

        debug!("Loaded snapshot with {} entries from {:?}", state.len(), self.path);
        Ok(state)
    }

    /// Replace the snapshot wholesale.
    ///
    /// The new content is written to a sibling temporary file and renamed over
    /// the old one, so readers see either the previous or the new snapshot.
    pub fn save(&self, state: &FileState) -> Result<(), StateError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string(state)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;

        info!("Committed snapshot with {} entries", state.len());
        Ok(())
    }
}
