// ABOUTME: User-facing terminal output for the colabond CLI
// Colored change listings, errors and the interactive banner

use crossterm::{
    cursor::MoveTo,
    execute,
    style::{style, Color, Stylize},
    terminal::{Clear, ClearType},
};
use std::io;

use crate::state::ChangeSet;

pub const BANNER: &str = r"
╓──────────────────────────────────────────────────────────╖
║            _____     __     __                __         ║
║           / ___/__  / /__ _/ /  ___  ___  ___/ /         ║
║          / /__/ _ \/ / _ `/ _ \/ _ \/ _ \/ _  /          ║
║          \___/\___/_/\_,_/_.__/\___/_//_/\_,_/           ║
║                                                          ║
╟──────────────────────────────────────────────────────────╢
│                    Interactive prompt                    │
╚──────────────────────────────────────────────────────────╝
";

pub const PROMPT: &str = "◎──────◎ Enter command:";

/// One line per changed path, in the order added, modified, deleted.
pub fn change_lines(changes: &ChangeSet) -> Vec<(Color, String)> {
    let added = changes
        .added
        .iter()
        .map(|c| (Color::Green, format!("[+] {}", c.path)));
    let modified = changes
        .modified
        .iter()
        .map(|c| (Color::Yellow, format!("[M] {}", c.path)));
    let deleted = changes
        .deleted
        .iter()
        .map(|c| (Color::Red, format!("[-] {}", c.path)));
    added.chain(modified).chain(deleted).collect()
}

pub fn print_changes(changes: &ChangeSet) {
    if changes.is_empty() {
        return;
    }

    println!("\nCommitting changes...");
    for (color, line) in change_lines(changes) {
        println!("{}", style(line).with(color));
    }
}

pub fn print_error(message: &str) {
    eprintln!("{}", style(message).red());
}

pub fn print_dimmed(message: &str) {
    println!("{}", style(message).dim());
}

pub fn print_banner() {
    println!("{BANNER}");
}

pub fn clear_screen() -> io::Result<()> {
    execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))
}
