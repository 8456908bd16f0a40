//! # Scheduling
//!
//! The coordinator does not own a timer. A scheduler calls [`Tick::tick`]
//! on a fixed period after an initial delay and stops as soon as a tick
//! answers [`TickControl::Cancel`]. Ticks never overlap: `tick` takes
//! `&mut self`, so a scheduler cannot start one before the previous one
//! returned.
//!
//! [`ManualScheduler`] is a deterministic driver measured in abstract ticks.
//! Async hosts bring their own (the readygate binary uses a tokio interval).

use serde::Serialize;

/// What the scheduler should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TickControl {
    /// Keep invoking.
    Continue,
    /// Stop invoking; no further ticks may be delivered.
    Cancel,
}

/// A unit of repeating work.
pub trait Tick {
    fn tick(&mut self) -> TickControl;
}

impl<F: FnMut() -> TickControl> Tick for F {
    fn tick(&mut self) -> TickControl {
        self()
    }
}

// =============================================================================
// MANUAL SCHEDULER
// =============================================================================

/// Result of a [`ManualScheduler`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The task cancelled itself at host tick `at_tick` after `polls`
    /// invocations.
    Cancelled { at_tick: u64, polls: u64 },
    /// The tick budget ran out while the task still wanted to continue.
    Exhausted { ticks: u64, polls: u64 },
}

impl RunOutcome {
    /// Number of invocations performed.
    #[must_use]
    pub fn polls(&self) -> u64 {
        match *self {
            RunOutcome::Cancelled { polls, .. } | RunOutcome::Exhausted { polls, .. } => polls,
        }
    }

    /// Whether the task cancelled itself.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunOutcome::Cancelled { .. })
    }
}

/// Deterministic scheduler with a period of one tick.
///
/// Host ticks are numbered from 0. The first invocation happens at tick
/// `initial_delay_ticks`; the run stops after `budget_ticks` host ticks
/// have elapsed. The budget exists for harnesses and simulations only.
#[derive(Debug, Clone, Copy)]
pub struct ManualScheduler {
    initial_delay_ticks: u64,
    budget_ticks: u64,
}

impl ManualScheduler {
    #[must_use]
    pub const fn new(initial_delay_ticks: u64, budget_ticks: u64) -> Self {
        Self {
            initial_delay_ticks,
            budget_ticks,
        }
    }

    /// Drive `task` until it cancels or the budget runs out.
    pub fn run<T: Tick + ?Sized>(&self, task: &mut T) -> RunOutcome {
        let mut polls = 0u64;
        let mut tick = self.initial_delay_ticks;

        while tick < self.budget_ticks {
            polls = polls.saturating_add(1);
            if task.tick() == TickControl::Cancel {
                return RunOutcome::Cancelled {
                    at_tick: tick,
                    polls,
                };
            }
            tick = tick.saturating_add(1);
        }

        RunOutcome::Exhausted {
            ticks: self.budget_ticks,
            polls,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
