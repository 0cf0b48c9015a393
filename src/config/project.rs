// ABOUTME: Per-project configuration and control-directory layout
// Describes where a connected project keeps its config and file-state snapshot

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{read_toml, write_toml, ConfigError};
use crate::state::{ScanOptions, SnapshotStore, CONTROL_DIR, PROJECT_CONFIG_FILE};

/// Written by `connect`, read by every command that needs a connected project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub email: String,
    pub project_id: String,
    /// Extra directory names to leave out of scans
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl ProjectConfig {
    pub fn new(email: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            project_id: project_id.into(),
            exclude: Vec::new(),
        }
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::with_extra_excludes(self.exclude.iter().cloned())
    }
}

/// Locations inside a project working directory.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn control_dir(&self) -> PathBuf {
        self.root.join(CONTROL_DIR)
    }

    pub fn config_file(&self) -> PathBuf {
        self.control_dir().join(PROJECT_CONFIG_FILE)
    }

    pub fn snapshot_store(&self) -> SnapshotStore {
        SnapshotStore::in_control_dir(&self.control_dir())
    }

    pub fn is_connected(&self) -> bool {
        self.config_file().is_file()
    }

    /// Read the project config, `None` when the project was never connected.
    pub fn load_config(&self) -> Result<Option<ProjectConfig>, ConfigError> {
        let path = self.config_file();
        if !path.exists() {
            return Ok(None);
        }
        read_toml(&path).map(Some)
    }

    pub fn save_config(&self, config: &ProjectConfig) -> Result<(), ConfigError> {
        write_toml(&self.config_file(), config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_project_config_roundtrip_through_control_dir() {
        let dir = TempDir::new().unwrap();
        let paths = ProjectPaths::new(dir.path());
        assert!(!paths.is_connected());
        assert_eq!(paths.load_config().unwrap(), None);

        let mut config = ProjectConfig::new("ada@example.com", "proj-42");
        config.exclude.push("datasets".to_string());
        paths.save_config(&config).unwrap();

        assert!(paths.is_connected());
        assert!(paths.config_file().ends_with(".colabond/colabond.toml"));
        assert_eq!(paths.load_config().unwrap(), Some(config));
    }

    #[test]
    fn test_exclude_is_optional_in_file() {
        let config: ProjectConfig =
            toml::from_str("email = \"a@b.c\"\nproject_id = \"p1\"\n").unwrap();

        assert!(config.exclude.is_empty());
        assert!(config.scan_options().denylist.iter().any(|d| d == ".git"));
    }
}
