// ABOUTME: Sync cycle orchestration between the local project and the colabond service
// Archive packing, precondition guards and the scan/diff/transmit/commit engine

pub mod archive;
pub mod connect;
pub mod engine;
pub mod error;
pub mod guards;

pub use archive::{build_archive, encode_archive, ArchiveError};
pub use connect::connect_project;
pub use engine::{PendingSync, SyncEngine};
pub use error::SyncError;
pub use guards::{require_agent_running, require_auth, require_connected};
