// ABOUTME: Remote side of a sync cycle
// The RemoteProject seam used by the sync engine and its reqwest-backed implementation

pub mod client;
pub mod error;
pub mod protocol;

pub use client::RemoteClient;
pub use error::RemoteError;
pub use protocol::ExecutionStatus;

use async_trait::async_trait;

use crate::config::Credentials;

/// Operations the sync engine needs from the remote service, scoped to one project.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteProject: Send + Sync {
    /// Current execution status of the project's remote agent.
    async fn execution_status(&self) -> Result<ExecutionStatus, RemoteError>;

    /// Ship a base64-encoded gzip tarball. `Ok` means the service accepted it.
    async fn upload_files(&self, archive: &str) -> Result<(), RemoteError>;

    async fn set_command(&self, command: &str) -> Result<(), RemoteError>;
}

/// A [`RemoteClient`] bound to one project and the signed-in user.
pub struct ProjectRemote {
    client: RemoteClient,
    credentials: Credentials,
    project_id: String,
}

impl ProjectRemote {
    pub fn new(client: RemoteClient, credentials: Credentials, project_id: impl Into<String>) -> Self {
        Self {
            client,
            credentials,
            project_id: project_id.into(),
        }
    }
}

#[async_trait]
impl RemoteProject for ProjectRemote {
    async fn execution_status(&self) -> Result<ExecutionStatus, RemoteError> {
        self.client
            .project_status(&self.credentials, &self.project_id)
            .await
    }

    async fn upload_files(&self, archive: &str) -> Result<(), RemoteError> {
        self.client
            .set_files(&self.credentials, &self.project_id, archive)
            .await
    }

    async fn set_command(&self, command: &str) -> Result<(), RemoteError> {
        self.client
            .set_command(&self.credentials, &self.project_id, command)
            .await
    }
}
