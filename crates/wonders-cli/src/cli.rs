//! CLI argument definitions for wonders.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wonders")]
#[command(about = "Score tracker for seven-category card game tables", version)]
pub struct Args {
    /// Path to config file (default: <config dir>/wonders/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// User list document (overrides the config)
    #[arg(long, value_name = "FILE", env = "WONDERS_STORE")]
    pub store: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage the list of known players
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Run a scoring session
    Play {
        /// Read session commands from a file instead of stdin
        #[arg(long, value_name = "FILE")]
        script: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum UsersAction {
    /// List known players
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a player
    Add {
        /// Player name
        name: String,
    },
}

/// Output format of the `export` session command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Tsv,
}
