// ABOUTME: Precondition checks run before any scan or transfer
// Each guard returns the value it validated so commands can compose them with `?`

use tracing::debug;

use super::SyncError;
use crate::config::{AppConfig, Credentials, ProjectConfig, ProjectPaths};
use crate::remote::RemoteProject;

/// The user must have signed in.
pub fn require_auth(config: &AppConfig) -> Result<Credentials, SyncError> {
    config.load_credentials()?.ok_or(SyncError::NotSignedIn)
}

/// The working directory must have been connected to a project.
pub fn require_connected(paths: &ProjectPaths) -> Result<ProjectConfig, SyncError> {
    paths.load_config()?.ok_or(SyncError::NotConnected)
}

/// The project's remote agent must be running.
pub async fn require_agent_running<R: RemoteProject>(
    remote: &R,
    project_id: &str,
) -> Result<(), SyncError> {
    let status = remote.execution_status().await?;
    debug!("Agent status for {}: {:?}", project_id, status);

    if status.is_running() {
        Ok(())
    } else {
        Err(SyncError::AgentNotRunning(project_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{ExecutionStatus, MockRemoteProject};
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_require_auth() {
        let home = TempDir::new().unwrap();
        let config = AppConfig::with_dirs(home.path().to_path_buf(), PathBuf::from(".")).unwrap();

        assert!(matches!(require_auth(&config), Err(SyncError::NotSignedIn)));

        let creds = Credentials::new("ada@example.com", "tok");
        creds.save(&config.credentials_path()).unwrap();
        assert_eq!(require_auth(&config).unwrap(), creds);
    }

    #[test]
    fn test_require_connected() {
        let dir = TempDir::new().unwrap();
        let paths = ProjectPaths::new(dir.path());

        assert!(matches!(require_connected(&paths), Err(SyncError::NotConnected)));

        paths.save_config(&ProjectConfig::new("ada@example.com", "p1")).unwrap();
        assert_eq!(require_connected(&paths).unwrap().project_id, "p1");
    }

    #[tokio::test]
    async fn test_require_agent_running() {
        let mut running = MockRemoteProject::new();
        running
            .expect_execution_status()
            .returning(|| Ok(ExecutionStatus::Running));
        assert!(require_agent_running(&running, "p1").await.is_ok());

        let mut stopped = MockRemoteProject::new();
        stopped
            .expect_execution_status()
            .returning(|| Ok(ExecutionStatus::Other("stopped".into())));
        let err = require_agent_running(&stopped, "p1").await.unwrap_err();
        assert!(matches!(err, SyncError::AgentNotRunning(id) if id == "p1"));
    }
}
