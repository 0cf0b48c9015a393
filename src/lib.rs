// ABOUTME: Library crate for colabond exposing public API for testing and external use

pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod remote;
pub mod state;
pub mod sync;
