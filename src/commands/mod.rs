// ABOUTME: Implementations of the colabond subcommands
// Each command validates its preconditions, then drives the sync engine or the remote client

pub mod auth;
pub mod connect;
pub mod exec;
pub mod shell;

use anyhow::{bail, Context as _, Result};

use crate::cli::Command;
use crate::config::{AppConfig, Credentials, ProjectConfig};
use crate::remote::{ProjectRemote, RemoteClient};
use crate::sync::SyncEngine;

/// Configuration loaded once per invocation and shared by every command.
pub struct Context {
    pub config: AppConfig,
}

impl Context {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn client(&self) -> Result<RemoteClient> {
        RemoteClient::new(&self.config.settings.host).context("Failed to create HTTP client")
    }

    /// Sync engine for the connected project, talking to the service as `credentials`.
    pub fn engine(
        &self,
        credentials: Credentials,
        project: &ProjectConfig,
    ) -> Result<SyncEngine<ProjectRemote>> {
        let remote = ProjectRemote::new(self.client()?, credentials, project.project_id.clone());
        Ok(SyncEngine::new(
            &self.config.project,
            project.scan_options(),
            remote,
        ))
    }
}

pub async fn run(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Connect => connect::connect(ctx).await,
        Command::Signin => auth::signin(ctx).await,
        Command::Signout => auth::signout(ctx),
        Command::FullSync => exec::full_sync(ctx).await,
        Command::Exec {
            interactive: true, ..
        } => shell::interactive(ctx).await,
        Command::Exec { command, .. } => {
            if command.is_empty() {
                bail!("'exec' must be followed by a command");
            }
            exec::exec(ctx, &command.join(" ")).await
        }
    }
}
