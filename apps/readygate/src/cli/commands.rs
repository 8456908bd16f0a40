//! # CLI Commands
//!
//! Implementations of CLI commands.

use super::Cli;
use crate::config::HostConfig;
use crate::error::HostError;
use crate::host::{self, RunReport, SimulationReport};
use readygate_core::RunOutcome;

/// Load the configuration named by the CLI and apply flag overrides.
pub fn load_config(cli: &Cli) -> Result<HostConfig, HostError> {
    let config = HostConfig::load(cli.config.as_deref())?.with_overrides(cli.overrides());
    config.validate()?;
    Ok(config)
}

/// Resolves when the process receives Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

// =============================================================================
// RUN COMMAND
// =============================================================================

/// Wait for components to settle, then start the application state.
pub async fn cmd_run(config: &HostConfig, json_mode: bool) -> Result<(), HostError> {
    let report = host::run_until(config, shutdown_signal()).await?;
    print_run_report(&report, json_mode)
}

fn print_run_report(report: &RunReport, json_mode: bool) -> Result<(), HostError> {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("Application state started.");
    println!("  Polls:        {}", report.status.polls);
    println!("  Elapsed:      {} ms", report.elapsed_ms);
    println!("  Warned:       {}", report.status.warned.len());
    for id in &report.status.warned {
        println!("    - {}", id);
    }
    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Print the effective configuration.
pub fn cmd_check(config: &HostConfig, json_mode: bool) -> Result<(), HostError> {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("Configuration OK");
    println!();
    println!("  Host:              {}", config.host.name);
    println!("  Tick interval:     {} ms", config.host.tick_interval_ms);
    println!(
        "  Initial delay:     {} tick(s)",
        config.coordinator.initial_delay_ticks
    );
    println!(
        "  Stable ticks:      {}",
        config.coordinator.stable_ticks_required
    );
    println!("  Components:        {}", config.components.len());
    for component in &config.components {
        let ready = component
            .ready_after_ms
            .map(|ms| format!("ready at {} ms", ms))
            .unwrap_or_else(|| "never ready".to_string());
        println!("    - {} ({})", component.name, ready);
    }
    Ok(())
}

// =============================================================================
// SIMULATE COMMAND
// =============================================================================

/// Replay the configured startup on simulated time.
pub fn cmd_simulate(config: &HostConfig, json_mode: bool, polls: u64) -> Result<(), HostError> {
    let report = host::simulate(config, polls)?;
    print_simulation_report(&report, json_mode)
}

fn print_simulation_report(report: &SimulationReport, json_mode: bool) -> Result<(), HostError> {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    match (report.outcome, report.fired_at_ms) {
        (RunOutcome::Cancelled { polls, .. }, Some(ms)) => {
            println!("Fired on poll {} (t = {} ms)", polls, ms);
        }
        (outcome, _) => {
            println!(
                "Still waiting after {} poll(s); not ready: {}",
                outcome.polls(),
                join_ids(&report.status.pending)
            );
        }
    }
    println!("  Warned:       {}", join_ids(&report.status.warned));
    Ok(())
}

fn join_ids(ids: &[readygate_core::ComponentId]) -> String {
    if ids.is_empty() {
        return "none".to_string();
    }
    ids.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
