//! # Logging
//!
//! Subscriber setup plus the `tracing` implementations of the coordinator's
//! logger and state-notification collaborators.

use readygate_core::{ReadinessLog, StateChange, StateNotifier};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable selecting the log format (`json` or `text`).
pub const LOG_FORMAT_ENV: &str = "READYGATE_LOG_FORMAT";

/// Initialize the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `readygate=info`, or
/// `readygate=debug` when `verbose` is set.
pub fn init_tracing(verbose: bool) {
    let log_format = std::env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "text".to_string());

    let default_filter = if verbose {
        "readygate=debug,readygate_core=debug"
    } else {
        "readygate=info,readygate_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

/// Coordinator logger backed by `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl ReadinessLog for TracingLog {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "readygate::coordinator", "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "readygate::coordinator", "{}", message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: "readygate::coordinator", "{}", message);
    }
}

/// Announces application state changes through `tracing` and keeps the
/// delivered notifications for the run report.
#[derive(Debug, Default)]
pub struct TracingNotifier {
    delivered: Vec<StateChange>,
}

impl TracingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications emitted so far, in order.
    #[must_use]
    pub fn delivered(&self) -> &[StateChange] {
        &self.delivered
    }
}

impl StateNotifier for TracingNotifier {
    fn notify(&mut self, change: StateChange) {
        tracing::info!(
            target: "readygate::state",
            phase = ?change.phase,
            "Application state change: {} -> {}",
            change.from,
            change.to
        );
        self.delivered.push(change);
    }
}

// =============================================================================
// TESTS
// =============================================================================
