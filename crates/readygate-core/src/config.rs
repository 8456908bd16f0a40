//! # Coordinator Configuration
//!
//! Two tunables: how long the scheduler waits before the first poll, and
//! how many consecutive unchanged polls the gate requires.

use crate::CoordinatorError;
use serde::{Deserialize, Serialize};

/// Default number of ticks before the first poll.
pub const DEFAULT_INITIAL_DELAY_TICKS: u64 = 1;

/// Default stable-tick threshold: one second at a 20 Hz tick rate.
pub const DEFAULT_STABLE_TICKS: u32 = 20;

/// Tunables for a [`crate::Coordinator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoordinatorConfig {
    /// Ticks the scheduler waits before the first poll.
    pub initial_delay_ticks: u64,
    /// Consecutive unchanged polls required before the gate may fire.
    pub stable_ticks_required: u32,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            initial_delay_ticks: DEFAULT_INITIAL_DELAY_TICKS,
            stable_ticks_required: DEFAULT_STABLE_TICKS,
        }
    }
}

impl CoordinatorConfig {
    /// Create a config with explicit values.
    #[must_use]
    pub const fn new(initial_delay_ticks: u64, stable_ticks_required: u32) -> Self {
        Self {
            initial_delay_ticks,
            stable_ticks_required,
        }
    }

    /// Replace the stable-tick threshold.
    #[must_use]
    pub const fn with_stable_ticks(mut self, stable_ticks_required: u32) -> Self {
        self.stable_ticks_required = stable_ticks_required;
        self
    }

    /// Replace the initial delay.
    #[must_use]
    pub const fn with_initial_delay(mut self, initial_delay_ticks: u64) -> Self {
        self.initial_delay_ticks = initial_delay_ticks;
        self
    }

    /// Check that the values describe a usable coordinator.
    ///
    /// A threshold of zero would let the first poll fire the gate without a
    /// single repeated observation, so it is rejected.
    pub fn validate(&self) -> Result<(), CoordinatorError> {
        if self.stable_ticks_required == 0 {
            return Err(CoordinatorError::InvalidConfig(
                "stable_ticks_required must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
