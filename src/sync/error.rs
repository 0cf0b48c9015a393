// ABOUTME: Error types for a sync cycle, including the precondition failures checked before it

use thiserror::Error;

use super::ArchiveError;
use crate::config::ConfigError;
use crate::remote::RemoteError;
use crate::state::StateError;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("You are not signed in. Run 'colabond signin' first.")]
    NotSignedIn,

    #[error("You have not connected your project. Run 'colabond connect'")]
    NotConnected,

    #[error("Colabond agent for id {0} is not running. Please ensure it is running in remote kernel.")]
    AgentNotRunning(String),

    #[error("No command specified")]
    EmptyCommand,

    #[error("Project state is unavailable ({0}). Run 'colabond connect'")]
    SnapshotUnavailable(#[source] StateError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
