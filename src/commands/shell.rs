// ABOUTME: Interactive shell started by `colabond exec -i`
// Line editor with in-session history; runs a sync cycle per command until `exit`, Ctrl-C or Ctrl-D

use anyhow::Result;
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use tracing::{debug, warn};

use super::{exec, Context};
use crate::console::{self, PROMPT};
use crate::sync::require_auth;

/// What a line typed at the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Blank,
    Exit,
    FullSync,
    Clear,
    Exec(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Self::Blank,
            "exit" => Self::Exit,
            "full-sync" => Self::FullSync,
            "clear" => Self::Clear,
            other => Self::Exec(other.to_string()),
        }
    }

    /// Interpret what the line editor returned. Ctrl-C and Ctrl-D leave the shell.
    pub fn from_signal(signal: Signal) -> Self {
        match signal {
            Signal::Success(line) => Self::parse(&line),
            Signal::CtrlC | Signal::CtrlD => Self::Exit,
        }
    }
}

pub async fn interactive(ctx: &Context) -> Result<()> {
    require_auth(&ctx.config)?;
    console::print_banner();

    // the default history is in memory and lasts for this session
    let mut editor = Reedline::create();
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic(PROMPT.to_string()),
        DefaultPromptSegment::Empty,
    );

    loop {
        let signal = editor.read_line(&prompt)?;

        let outcome = match ShellCommand::from_signal(signal) {
            ShellCommand::Blank => continue,
            ShellCommand::Exit => {
                debug!("Leaving interactive shell");
                break;
            }
            ShellCommand::FullSync => exec::full_sync(ctx).await,
            ShellCommand::Clear => {
                console::clear_screen()?;
                console::print_banner();
                Ok(())
            }
            ShellCommand::Exec(command) => exec::exec(ctx, &command).await,
        };

        // a failed cycle never ends the session
        if let Err(e) = outcome {
            warn!("Shell command failed: {:#}", e);
            console::print_error(&format!("{e:#}"));
        }
    }

    Ok(())
}
