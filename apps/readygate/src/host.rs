//! # Host Runtime
//!
//! Wires the coordinator to its collaborators and drives it:
//! - [`IntervalScheduler`]: tokio interval, one poll per tick period
//! - [`run_until`]: live run against the scripted registry, cancellable by a
//!   shutdown future (Ctrl+C in the binary)
//! - [`simulate`]: deterministic run on the core's `ManualScheduler`

use crate::config::HostConfig;
use crate::error::HostError;
use crate::logging::{TracingLog, TracingNotifier};
use crate::registry::{Clock, ScriptedRegistry, SteppedClock, TokioClock};
use readygate_core::{
    Coordinator, CoordinatorStatus, ManualScheduler, NotifyingInitializer, RunOutcome,
    StateChange, Tick, TickControl,
};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};

/// Coordinator as assembled by the host.
pub type HostCoordinator<C> =
    Coordinator<ScriptedRegistry<C>, TracingLog, NotifyingInitializer<TracingNotifier>>;

/// Build a coordinator over the scripted registry.
pub fn build_coordinator<C: Clock>(
    config: &HostConfig,
    clock: C,
) -> Result<HostCoordinator<C>, HostError> {
    let registry = ScriptedRegistry::new(config, clock);
    let coordinator = Coordinator::new(
        config.host_id(),
        config.coordinator,
        registry,
        TracingLog,
        NotifyingInitializer::new(TracingNotifier::new()),
    )?;
    Ok(coordinator)
}

// =============================================================================
// INTERVAL SCHEDULER
// =============================================================================

/// Repeating tokio timer: first tick after the initial delay, then one tick
/// per period. A slow tick delays the next one rather than bursting.
#[derive(Debug, Clone, Copy)]
pub struct IntervalScheduler {
    period: Duration,
    initial_delay: Duration,
}

impl IntervalScheduler {
    /// A zero period is clamped to 1 ms.
    #[must_use]
    pub fn new(tick_interval_ms: u64, initial_delay_ticks: u64) -> Self {
        Self {
            period: Duration::from_millis(tick_interval_ms.max(1)),
            initial_delay: Duration::from_millis(
                tick_interval_ms.saturating_mul(initial_delay_ticks),
            ),
        }
    }

    #[must_use]
    pub fn from_config(config: &HostConfig) -> Self {
        Self::new(
            config.host.tick_interval_ms,
            config.coordinator.initial_delay_ticks,
        )
    }

    /// Drive `task` until it cancels. Returns the number of ticks delivered.
    pub async fn run<T: Tick + ?Sized>(&self, task: &mut T) -> u64 {
        tokio::time::sleep(self.initial_delay).await;

        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut ticks = 0u64;
        loop {
            interval.tick().await;
            ticks = ticks.saturating_add(1);
            if task.tick() == TickControl::Cancel {
                return ticks;
            }
        }
    }
}

// =============================================================================
// LIVE RUN
// =============================================================================

/// Outcome of a completed live run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub status: CoordinatorStatus,
    pub ticks: u64,
    pub elapsed_ms: u64,
    pub notifications: Vec<StateChange>,
}

/// Run the coordinator until it fires or `shutdown` resolves.
pub async fn run_until<F>(config: &HostConfig, shutdown: F) -> Result<RunReport, HostError>
where
    F: Future<Output = ()>,
{
    config.validate()?;
    let started = Instant::now();
    let mut coordinator = build_coordinator(config, TokioClock::start())?;
    let scheduler = IntervalScheduler::from_config(config);

    tracing::info!(
        host = %coordinator.host(),
        components = config.components.len(),
        tick_interval_ms = config.host.tick_interval_ms,
        stable_ticks_required = config.coordinator.stable_ticks_required,
        "Waiting for components to settle"
    );

    let ticks = tokio::select! {
        ticks = scheduler.run(&mut coordinator) => Some(ticks),
        () = shutdown => None,
    };

    let status = coordinator.status();
    let Some(ticks) = ticks else {
        let pending: Vec<&str> = status.pending.iter().map(|id| id.as_str()).collect();
        tracing::warn!(
            polls = status.polls,
            stable_ticks = status.stable_ticks,
            "Shutdown requested before components settled; not ready: [{}]",
            pending.join(", ")
        );
        return Err(HostError::Interrupted {
            pending: status.pending.len(),
        });
    };

    Ok(RunReport {
        status,
        ticks,
        elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        notifications: coordinator.initializer().notifier().delivered().to_vec(),
    })
}

// =============================================================================
// SIMULATION
// =============================================================================

/// Outcome of a simulated run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub outcome: RunOutcome,
    /// Simulated time of the firing poll.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fired_at_ms: Option<u64>,
    pub status: CoordinatorStatus,
}

/// Drive the coordinator for at most `max_polls` polls on simulated time.
pub fn simulate(config: &HostConfig, max_polls: u64) -> Result<SimulationReport, HostError> {
    config.validate()?;
    let delay = config.coordinator.initial_delay_ticks;
    let interval_ms = config.host.tick_interval_ms;

    let mut coordinator = build_coordinator(config, SteppedClock::new(interval_ms, delay))?;
    let outcome = ManualScheduler::new(delay, delay.saturating_add(max_polls)).run(&mut coordinator);

    let fired_at_ms = match outcome {
        RunOutcome::Cancelled { at_tick, .. } => Some(at_tick.saturating_mul(interval_ms)),
        RunOutcome::Exhausted { .. } => None,
    };

    Ok(SimulationReport {
        outcome,
        fired_at_ms,
        status: coordinator.status(),
    })
}
