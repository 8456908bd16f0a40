//! # Transition Gate
//!
//! Two-state machine guarding the downstream transition:
//!
//! | State | Meaning | Next |
//! |-------|---------|------|
//! | `Waiting` | Polling; the transition has not happened | `Fired` |
//! | `Fired` | Transition performed; terminal | none |

use serde::{Deserialize, Serialize};

/// State of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    /// Initial state.
    Waiting,
    /// Terminal state.
    Fired,
}

impl std::fmt::Display for GateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateState::Waiting => f.write_str("waiting"),
            GateState::Fired => f.write_str("fired"),
        }
    }
}

/// One-shot gate.
#[derive(Debug, Clone)]
pub struct TransitionGate {
    state: GateState,
    threshold: u32,
}

impl TransitionGate {
    /// Create a waiting gate requiring `threshold` stable ticks.
    #[must_use]
    pub const fn new(threshold: u32) -> Self {
        Self {
            state: GateState::Waiting,
            threshold,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> GateState {
        self.state
    }

    /// Required stable ticks.
    #[must_use]
    pub const fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Whether the gate has fired.
    #[must_use]
    pub const fn is_fired(&self) -> bool {
        matches!(self.state, GateState::Fired)
    }

    /// Evaluate the gate for the current poll.
    ///
    /// Returns `true` exactly once: on the first call where the gate is
    /// waiting, `stable_ticks >= threshold` and `all_ready` hold. The state
    /// is `Fired` before this returns, so any later call returns `false`.
    pub fn try_fire(&mut self, stable_ticks: u32, all_ready: bool) -> bool {
        if self.is_fired() || stable_ticks < self.threshold || !all_ready {
            return false;
        }
        self.state = GateState::Fired;
        true
    }
}

// =============================================================================
// TESTS
// =============================================================================
