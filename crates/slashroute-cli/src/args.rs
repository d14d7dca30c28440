//! CLI argument definitions using clap
//!
//! - slashroute replay <payload.json>   # Dispatch a recorded interaction
//! - slashroute commands                # Show the demo handler tree

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "slashroute.toml";

#[derive(Parser)]
#[command(name = "slashroute")]
#[command(about = "Replay slash-command interaction payloads through a handler tree")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Log level, overrides the config file (RUST_LOG takes precedence)
    #[arg(long, global = true, env = "SLASHROUTE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Cap on autocomplete choices sent back, overrides the config file
    #[arg(long, global = true)]
    pub choice_limit: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Dispatch an interaction payload and print every response
    Replay {
        /// JSON payload file, or `-` for stdin
        payload: PathBuf,

        /// Guild id to use when the payload carries none
        #[arg(long)]
        guild: Option<u64>,

        /// Cancel the invocation after this many milliseconds
        #[arg(long)]
        cancel_after_ms: Option<u64>,
    },

    /// List the registered demo commands and their children
    Commands,
}
