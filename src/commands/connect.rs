// ABOUTME: connect command: binds the working directory to a remote project

use anyhow::{bail, Result};
use dialoguer::Input;

use super::{exec, Context};
use crate::remote::RemoteError;
use crate::sync::{connect_project, require_auth};

pub async fn connect(ctx: &Context) -> Result<()> {
    let credentials = require_auth(&ctx.config)?;
    println!("Connecting to the project");

    let project_id: String = Input::new()
        .with_prompt("Project id (from colabond dashboard)")
        .interact_text()?;
    let project_id = project_id.trim();

    match ctx.client()?.project_status(&credentials, project_id).await {
        Ok(_) => {}
        Err(RemoteError::ProjectNotFound(_)) => bail!("Project does not exist. Aborting."),
        Err(e) => return Err(e.into()),
    }

    connect_project(&ctx.config.project, &credentials, project_id)?;
    println!("Project connected");

    exec::full_sync(ctx).await?;
    println!("Initial full sync completed");
    Ok(())
}
