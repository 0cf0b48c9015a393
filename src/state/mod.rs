// ABOUTME: File-state tracking and change detection for the project tree
// Scanner, change-set resolver and the persisted snapshot they operate on

pub mod changes;
pub mod error;
pub mod scanner;
pub mod snapshot;

pub use changes::{commit, diff, ChangeSet, FileChange};
pub use error::StateError;
pub use scanner::{scan, FileState, ScanOptions, CONTROL_DIR, DEFAULT_DENYLIST, PROJECT_CONFIG_FILE};
pub use snapshot::{SnapshotStore, SNAPSHOT_FILE};
