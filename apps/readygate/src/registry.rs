//! # Scripted Registry
//!
//! Replays the `[[components]]` lifecycle from the configuration so a
//! startup sequence can be rehearsed without the real components. The host
//! itself is always listed (ready), as a real plugin manager would.

use crate::config::{HostConfig, ScriptedComponent};
use readygate_core::{ComponentId, ComponentRegistry, ComponentStatus};
use std::cell::Cell;
use tokio::time::Instant;

// =============================================================================
// CLOCKS
// =============================================================================

/// Milliseconds elapsed since host start, as seen by one registry read.
pub trait Clock {
    fn elapsed_ms(&self) -> u64;
}

/// Wall clock based on `tokio::time`, so paused test time applies.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    start: Instant,
}

impl TokioClock {
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Deterministic clock for simulated runs: the n-th read (0-based) reports
/// the time of host tick `initial_delay_ticks + n`.
#[derive(Debug)]
pub struct SteppedClock {
    tick_interval_ms: u64,
    initial_delay_ticks: u64,
    reads: Cell<u64>,
}

impl SteppedClock {
    #[must_use]
    pub fn new(tick_interval_ms: u64, initial_delay_ticks: u64) -> Self {
        Self {
            tick_interval_ms,
            initial_delay_ticks,
            reads: Cell::new(0),
        }
    }
}

impl Clock for SteppedClock {
    fn elapsed_ms(&self) -> u64 {
        let n = self.reads.get();
        self.reads.set(n.saturating_add(1));
        self.initial_delay_ticks
            .saturating_add(n)
            .saturating_mul(self.tick_interval_ms)
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Registry listing the configured components at the clock's current time.
#[derive(Debug)]
pub struct ScriptedRegistry<C> {
    host: ComponentId,
    components: Vec<ScriptedComponent>,
    clock: C,
}

impl<C: Clock> ScriptedRegistry<C> {
    #[must_use]
    pub fn new(config: &HostConfig, clock: C) -> Self {
        Self {
            host: config.host_id(),
            components: config.components.clone(),
            clock,
        }
    }

    /// Listing at an explicit time, host first.
    #[must_use]
    pub fn listing_at(&self, elapsed_ms: u64) -> Vec<ComponentStatus> {
        std::iter::once(ComponentStatus::ready(self.host.clone()))
            .chain(
                self.components
                    .iter()
                    .filter_map(|component| component.status_at(elapsed_ms)),
            )
            .collect()
    }
}

impl<C: Clock> ComponentRegistry for ScriptedRegistry<C> {
    fn components(&self) -> Vec<ComponentStatus> {
        self.listing_at(self.clock.elapsed_ms())
    }
}

// =============================================================================
// TESTS
// =============================================================================
