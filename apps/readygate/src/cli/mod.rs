//! # readygate CLI Module
//!
//! ## Available Commands
//!
//! - `run` - Wait for the configured components to settle, then start
//! - `check` - Validate the configuration and print effective settings
//! - `simulate` - Replay the configured startup on simulated time

mod commands;

use crate::config::Overrides;
use crate::error::HostError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// readygate - start the application once every component has settled
///
/// Polls component readiness on a fixed tick and starts the application
/// state exactly once, after the set has been unchanged for long enough
/// with nothing left not ready.
#[derive(Parser, Debug)]
#[command(name = "readygate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (per-poll readiness changes)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the TOML configuration (default: ./readygate.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Required consecutive unchanged polls (overrides the file)
    #[arg(long, global = true)]
    pub stable_ticks: Option<u32>,

    /// Ticks before the first poll (overrides the file)
    #[arg(long, global = true)]
    pub initial_delay: Option<u64>,

    /// Tick period in milliseconds (overrides the file)
    #[arg(long, global = true)]
    pub tick_ms: Option<u64>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Overrides collected from the flags.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            stable_ticks: self.stable_ticks,
            initial_delay_ticks: self.initial_delay,
            tick_interval_ms: self.tick_ms,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Wait for components to settle, then start the application state
    Run,

    /// Validate configuration and print effective settings
    Check,

    /// Replay the configured startup on simulated time
    Simulate {
        /// Maximum number of polls before giving up
        #[arg(short, long, default_value = "1200")]
        polls: u64,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), HostError> {
    let config = load_config(&cli)?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Run) | None => cmd_run(&config, json_mode).await,
        Some(Commands::Check) => cmd_check(&config, json_mode),
        Some(Commands::Simulate { polls }) => cmd_simulate(&config, json_mode, polls),
    }
}
