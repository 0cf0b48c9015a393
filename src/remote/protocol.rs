// ABOUTME: Request and response shapes of the colabond HTTP API
// Requests are form-encoded, responses are JSON

use serde::{Deserialize, Serialize};

pub const AUTH_ENDPOINT: &str = "/api/v1/auth";
pub const PROJECTS_ENDPOINT: &str = "/api/v1/projects";
pub const SET_FILES_ENDPOINT: &str = "/api/v1/project_set_files";
pub const SET_COMMAND_ENDPOINT: &str = "/api/v1/project_set_command";

#[derive(Debug, Serialize)]
pub struct AuthForm<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ProjectForm<'a> {
    pub project_id: &'a str,
    pub email: &'a str,
    pub token: &'a str,
}

/// `files` is a base64-encoded gzip tarball.
#[derive(Debug, Serialize)]
pub struct SetFilesForm<'a> {
    pub project_id: &'a str,
    pub files: &'a str,
    pub email: &'a str,
    pub token: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SetCommandForm<'a> {
    pub project_id: &'a str,
    pub email: &'a str,
    pub command: &'a str,
    pub token: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectResponse {
    #[serde(default)]
    pub execution_status: Option<String>,
}

/// Envelope returned by the mutating endpoints.
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

/// Whether the remote kernel agent for a project is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStatus {
    Running,
    Other(String),
    Unknown,
}

impl ExecutionStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl From<Option<String>> for ExecutionStatus {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("running") => Self::Running,
            Some(other) => Self::Other(other.to_string()),
            None => Self::Unknown,
        }
    }
}
