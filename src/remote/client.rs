// ABOUTME: HTTP client for the colabond service
// Wraps reqwest with the form-encoded endpoints used for auth, projects, files and commands

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::protocol::{
    AuthForm, AuthResponse, ExecutionStatus, ProjectForm, ProjectResponse, SetCommandForm,
    SetFilesForm, StatusResponse, AUTH_ENDPOINT, PROJECTS_ENDPOINT, SET_COMMAND_ENDPOINT,
    SET_FILES_ENDPOINT,
};
use super::RemoteError;
use crate::config::Credentials;

#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    host: String,
}

impl RemoteClient {
    pub fn new(host: &str) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("colabond/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            host: host.trim_end_matches('/').to_string(),
        })
    }

    async fn post_form<F: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        form: &F,
    ) -> Result<reqwest::Response, RemoteError> {
        let url = format!("{}{}", self.host, endpoint);
        debug!("POST {}", url);
        Ok(self.http.post(url).form(form).send().await?)
    }

    async fn read_json<T: DeserializeOwned>(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T, RemoteError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| RemoteError::UnexpectedResponse {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }

    /// Exchange email and password for an API token.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Credentials, RemoteError> {
        let response = self
            .post_form(AUTH_ENDPOINT, &AuthForm { email, password })
            .await?;

        // any readable body without a token is a failed sign-in
        let body = response.text().await?;
        let token = serde_json::from_str::<AuthResponse>(&body)
            .ok()
            .and_then(|auth| auth.token)
            .filter(|t| !t.is_empty());

        match token {
            Some(token) => {
                info!("Authenticated {}", email);
                Ok(Credentials::new(email, token))
            }
            None => {
                warn!("Authentication rejected for {}", email);
                Err(RemoteError::InvalidCredentials)
            }
        }
    }

    /// Look up a project; a failure status means it does not exist.
    pub async fn project_status(
        &self,
        credentials: &Credentials,
        project_id: &str,
    ) -> Result<ExecutionStatus, RemoteError> {
        let form = ProjectForm {
            project_id,
            email: &credentials.email,
            token: &credentials.token,
        };
        let response = self.post_form(PROJECTS_ENDPOINT, &form).await?;

        if !response.status().is_success() {
            return Err(RemoteError::ProjectNotFound(project_id.to_string()));
        }

        let body: ProjectResponse = Self::read_json(PROJECTS_ENDPOINT, response).await?;
        Ok(ExecutionStatus::from(body.execution_status))
    }

    /// Upload a base64-encoded gzip tarball of project files.
    pub async fn set_files(
        &self,
        credentials: &Credentials,
        project_id: &str,
        files: &str,
    ) -> Result<(), RemoteError> {
        let form = SetFilesForm {
            project_id,
            files,
            email: &credentials.email,
            token: &credentials.token,
        };
        let response = self.post_form(SET_FILES_ENDPOINT, &form).await?;
        Self::expect_accepted(SET_FILES_ENDPOINT, response).await
    }

    /// Set the command the remote agent should execute next.
    pub async fn set_command(
        &self,
        credentials: &Credentials,
        project_id: &str,
        command: &str,
    ) -> Result<(), RemoteError> {
        let form = SetCommandForm {
            project_id,
            email: &credentials.email,
            command,
            token: &credentials.token,
        };
        let response = self.post_form(SET_COMMAND_ENDPOINT, &form).await?;
        Self::expect_accepted(SET_COMMAND_ENDPOINT, response).await
    }

    async fn expect_accepted(endpoint: &str, response: reqwest::Response) -> Result<(), RemoteError> {
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body: StatusResponse = Self::read_json(endpoint, response).await?;
        if body.is_error() {
            let message = body
                .message
                .unwrap_or_else(|| format!("{endpoint} reported an error"));
            return Err(RemoteError::Rejected(message));
        }

        Ok(())
    }
}
