// ABOUTME: exec and full-sync commands, the two operations that run a sync cycle

use anyhow::Result;

use super::Context;
use crate::console;
use crate::sync::{require_agent_running, require_auth, require_connected};

pub async fn exec(ctx: &Context, command: &str) -> Result<()> {
    let project = require_connected(&ctx.config.project)?;
    let credentials = require_auth(&ctx.config)?;

    let engine = ctx.engine(credentials, &project)?;
    engine.exec(command, console::print_changes).await?;

    console::print_dimmed(&format!("\nCommand set: `{command}`"));
    Ok(())
}

pub async fn full_sync(ctx: &Context) -> Result<()> {
    let credentials = require_auth(&ctx.config)?;
    let project = require_connected(&ctx.config.project)?;

    let engine = ctx.engine(credentials, &project)?;
    require_agent_running(engine.remote(), &project.project_id).await?;
    engine.full_sync().await?;

    println!("Full sync completed");
    Ok(())
}
