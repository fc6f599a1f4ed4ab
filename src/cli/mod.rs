//! CLI entry point for ggi.

pub mod auth;

use clap::{Parser, Subcommand};

/// Go-Git-It: manage your to-do list with Git and GitHub.
#[derive(Parser, Debug)]
#[command(
    name = "ggi",
    version,
    about = "Go-Git-It (ggi) manages your to-do list using Git functionalities"
)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Authorize ggi with your GitHub account
    Login,
    /// Show which GitHub account ggi acts as
    Whoami,
    /// Show auth status and the to-do repos in your profile
    Info,
    /// Forget the stored GitHub credential
    Logout,
}
