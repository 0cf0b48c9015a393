// ABOUTME: Initializes the control directory of a newly connected project
// Writes the project config and the first snapshot from a connect-time scan

use std::fs;
use tracing::info;

use super::SyncError;
use crate::config::{Credentials, ProjectConfig, ProjectPaths};
use crate::state;

/// Record `project_id` as the project behind `paths`.
///
/// Reconnecting keeps the `exclude` list of an existing config.
pub fn connect_project(
    paths: &ProjectPaths,
    credentials: &Credentials,
    project_id: &str,
) -> Result<ProjectConfig, SyncError> {
    let mut config = ProjectConfig::new(credentials.email.clone(), project_id);
    if let Some(previous) = paths.load_config()? {
        config.exclude = previous.exclude;
    }

    fs::create_dir_all(paths.control_dir()).map_err(state::StateError::from)?;

    let initial = state::scan(paths.root(), &config.scan_options().for_connect())?;
    paths.snapshot_store().save(&initial)?;
    paths.save_config(&config)?;

    info!(
        "Connected {} to project {} with {} tracked files",
        paths.root().display(),
        project_id,
        initial.len()
    );
    Ok(config)
}
