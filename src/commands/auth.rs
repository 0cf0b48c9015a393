// ABOUTME: signin and signout commands

use anyhow::{Context as _, Result};
use dialoguer::{Input, Password};

use super::Context;
use crate::config::Credentials;
use crate::sync::require_auth;

pub async fn signin(ctx: &Context) -> Result<()> {
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;

    let credentials = ctx.client()?.authenticate(email.trim(), &password).await?;
    credentials
        .save(&ctx.config.credentials_path())
        .context("Failed to store credentials")?;

    println!("Successfully signed in");
    Ok(())
}

pub fn signout(ctx: &Context) -> Result<()> {
    require_auth(&ctx.config)?;
    Credentials::remove(&ctx.config.credentials_path())?;

    println!("Successfully signed out");
    Ok(())
}
