// ABOUTME: Error types for file-state scanning and snapshot persistence
// Defines error conditions raised while reading the project tree or the snapshot file

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Project root not readable: {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot not found at {0}")]
    SnapshotMissing(PathBuf),

    #[error("Snapshot at {path} is corrupt: {source}")]
    SnapshotCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to replace snapshot: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
