// ABOUTME: Command-line surface of the colabond binary

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "colabond",
    version,
    about = "Sync a local project to its Colabond remote kernel and run commands there"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Connect to the project in colabond
    Connect,
    /// Send a command to the server for execution
    Exec {
        /// Run in interactive mode
        #[arg(short, long)]
        interactive: bool,
        /// Command to execute remotely
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Perform a full sync between local project and the server
    FullSync,
    /// Sign in to colabond
    Signin,
    /// Sign out of colabond
    Signout,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Option<Command> {
        Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn test_exec_joins_trailing_arguments() {
        assert_eq!(
            parse(&["colabond", "exec", "python", "train.py", "--epochs", "3"]),
            Some(Command::Exec {
                interactive: false,
                command: vec!["python".into(), "train.py".into(), "--epochs".into(), "3".into()],
            })
        );
    }

    #[test]
    fn test_exec_interactive_flag() {
        assert_eq!(
            parse(&["colabond", "exec", "-i"]),
            Some(Command::Exec {
                interactive: true,
                command: vec![],
            })
        );
    }

    #[test]
    fn test_flag_after_command_belongs_to_command() {
        assert_eq!(
            parse(&["colabond", "exec", "python", "-i"]),
            Some(Command::Exec {
                interactive: false,
                command: vec!["python".into(), "-i".into()],
            })
        );
    }

    #[test]
    fn test_simple_subcommands() {
        assert_eq!(parse(&["colabond", "full-sync"]), Some(Command::FullSync));
        assert_eq!(parse(&["colabond", "connect"]), Some(Command::Connect));
        assert_eq!(parse(&["colabond"]), None);
    }

    #[test]
    fn test_unknown_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["colabond", "deploy"]).is_err());
    }
}
