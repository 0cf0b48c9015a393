// ABOUTME: Stored sign-in credentials for the colabond service
// Kept in the user's home control directory and shared by every project

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::{read_toml, write_toml, ConfigError};

/// File name of the credentials file inside `~/.colabond`.
pub const CREDENTIALS_FILE: &str = "cred.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub token: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            token: token.into(),
        }
    }

    /// Read credentials, `None` when the user never signed in.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        read_toml(path).map(Some)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        write_toml(path, self)
    }

    /// Forget stored credentials. Returns whether a file was removed.
    pub fn remove(path: &Path) -> Result<bool, ConfigError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_credentials_lifecycle() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".colabond").join(CREDENTIALS_FILE);

        assert_eq!(Credentials::load(&path).unwrap(), None);

        let creds = Credentials::new("ada@example.com", "tok-123");
        creds.save(&path).unwrap();
        assert_eq!(Credentials::load(&path).unwrap(), Some(creds));

        assert!(Credentials::remove(&path).unwrap());
        assert!(!Credentials::remove(&path).unwrap());
        assert_eq!(Credentials::load(&path).unwrap(), None);
    }

    #[test]
    fn test_malformed_credentials_are_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CREDENTIALS_FILE);
        fs::write(&path, "email = ").unwrap();

        assert!(matches!(
            Credentials::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
