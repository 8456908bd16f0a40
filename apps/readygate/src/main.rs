//! # readygate
//!
//! Waits for every configured component to settle, then starts the
//! application state exactly once.
//!
//! ## Usage
//!
//! ```bash
//! # Wait using ./readygate.toml
//! readygate run
//!
//! # Validate a configuration
//! readygate --config startup.toml check
//!
//! # Rehearse a startup without waiting in real time
//! readygate --config startup.toml simulate --polls 2000
//! ```

use clap::Parser;
use readygate::{cli, logging};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // READYGATE_LOG_FORMAT=json enables machine-parseable output.
    logging::init_tracing(cli.verbose);

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!("readygate v{}", env!("CARGO_PKG_VERSION"));
    println!();
}
