// ABOUTME: Configuration for the colabond CLI
// Global settings, stored credentials and per-project config, loaded once per invocation

pub mod credentials;
pub mod error;
pub mod project;

pub use credentials::{Credentials, CREDENTIALS_FILE};
pub use error::ConfigError;
pub use project::{ProjectConfig, ProjectPaths};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default colabond service endpoint.
pub const DEFAULT_HOST: &str = "https://colabond.co";

/// Environment variable overriding the service endpoint.
pub const HOST_ENV_VAR: &str = "COLABOND_HOST";

/// User-level settings from `~/.colabond/config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the colabond service
    pub host: String,
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Apply a host override, typically from `COLABOND_HOST`.
    #[must_use]
    pub fn with_host_override(mut self, host: Option<String>) -> Self {
        if let Some(host) = host.filter(|h| !h.trim().is_empty()) {
            self.host = host.trim_end_matches('/').to_string();
        }
        self
    }
}

/// Everything a command needs to know about where things live.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub settings: Settings,
    /// `~/.colabond`
    pub home_dir: PathBuf,
    pub project: ProjectPaths,
}

impl AppConfig {
    /// Load settings for the current user and a project rooted at `project_root`.
    pub fn load(project_root: PathBuf) -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        let mut config = Self::with_dirs(home.join(".colabond"), project_root)?;
        config.settings = config
            .settings
            .with_host_override(std::env::var(HOST_ENV_VAR).ok());
        Ok(config)
    }

    /// Load using explicit directories, without consulting the environment.
    pub fn with_dirs(home_dir: PathBuf, project_root: PathBuf) -> Result<Self, ConfigError> {
        let settings_path = home_dir.join("config.toml");
        let settings = if settings_path.exists() {
            read_toml(&settings_path)?
        } else {
            Settings::default()
        };
        debug!("Using colabond host {}", settings.host);

        Ok(Self {
            settings,
            home_dir,
            project: ProjectPaths::new(project_root),
        })
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.home_dir.join(CREDENTIALS_FILE)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.home_dir.join("logs")
    }

    pub fn load_credentials(&self) -> Result<Option<Credentials>, ConfigError> {
        Credentials::load(&self.credentials_path())
    }
}

pub(crate) fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_toml<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(value)?)?;
    Ok(())
}
