//! # readygate-core
//!
//! The stability-detection coordinator for readygate - THE LOGIC.
//!
//! A host process starts many components that report only a boolean
//! "enabled" flag and never signal completion. This crate polls those flags
//! on a fixed tick, waits until the whole set has stopped changing for a
//! configured number of ticks with nothing left not ready, and then starts
//! the application state exactly once.
//!
//! ## Architectural Constraints
//!
//! - Pure, synchronous Rust: NO async, NO network, NO logging dependency
//! - Deterministic: `BTreeMap`/`BTreeSet` only
//! - Collaborators are injected through traits:
//!   [`ComponentRegistry`], [`ReadinessLog`], [`DownstreamInitializer`],
//!   and driven by any scheduler through [`Tick`]
//! - Not-ready components are tolerated and warned about once, never healed

// =============================================================================
// MODULES
// =============================================================================

pub mod config;
pub mod coordinator;
pub mod gate;
pub mod initializer;
pub mod log;
pub mod registry;
pub mod scheduler;
pub mod snapshot;
pub mod tracker;
pub mod types;
pub mod warnings;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{ComponentId, ComponentStatus, CoordinatorError};

// =============================================================================
// RE-EXPORTS: Coordinator
// =============================================================================

pub use config::{CoordinatorConfig, DEFAULT_INITIAL_DELAY_TICKS, DEFAULT_STABLE_TICKS};
pub use coordinator::{Coordinator, CoordinatorStatus, TickReport};
pub use gate::{GateState, TransitionGate};
pub use snapshot::ReadinessSnapshot;
pub use tracker::{ReadinessChange, StabilityTracker};
pub use warnings::WarnedSet;

// =============================================================================
// RE-EXPORTS: Collaborators
// =============================================================================

pub use initializer::{
    AppState, DownstreamInitializer, NotifyPhase, NotifyingInitializer, StateChange, StateNotifier,
};
pub use log::{NullLog, ReadinessLog};
pub use registry::{ComponentRegistry, InMemoryRegistry};
pub use scheduler::{ManualScheduler, RunOutcome, Tick, TickControl};
