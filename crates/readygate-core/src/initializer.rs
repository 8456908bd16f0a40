//! # Downstream Initializer
//!
//! The coordinator's single output. What the initializer does is up to the
//! host; the provided [`NotifyingInitializer`] announces the application
//! state change to other subsystems as an ordered pre/post pair.

use serde::{Deserialize, Serialize};

/// Receives the one-time "begin application state setup" call.
pub trait DownstreamInitializer {
    /// Start application state setup. Invoked at most once per coordinator.
    fn begin(&mut self);
}

impl<F: FnMut()> DownstreamInitializer for F {
    fn begin(&mut self) {
        self();
    }
}

// =============================================================================
// STATE NOTIFICATIONS
// =============================================================================

/// Application lifecycle states announced at transition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppState {
    /// Components are still starting.
    Preparing,
    /// Components have settled; the application may start.
    PreStart,
}

impl std::fmt::Display for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppState::Preparing => f.write_str("PREPARING"),
            AppState::PreStart => f.write_str("PRE_START"),
        }
    }
}

/// Which side of the state change a notification is emitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyPhase {
    /// Before the state is applied.
    Pre,
    /// After the state is applied.
    Post,
}

/// A state change announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    pub phase: NotifyPhase,
    pub from: AppState,
    pub to: AppState,
}

/// Sink for state change announcements.
pub trait StateNotifier {
    fn notify(&mut self, change: StateChange);
}

/// Initializer that announces `Preparing → PreStart` with a pre and a post
/// notification, in that order.
#[derive(Debug)]
pub struct NotifyingInitializer<N> {
    notifier: N,
}

impl<N: StateNotifier> NotifyingInitializer<N> {
    /// Wrap a notifier.
    #[must_use]
    pub fn new(notifier: N) -> Self {
        Self { notifier }
    }

    /// Borrow the wrapped notifier.
    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Unwrap the notifier.
    #[must_use]
    pub fn into_notifier(self) -> N {
        self.notifier
    }
}

impl<N: StateNotifier> DownstreamInitializer for NotifyingInitializer<N> {
    fn begin(&mut self) {
        for phase in [NotifyPhase::Pre, NotifyPhase::Post] {
            self.notifier.notify(StateChange {
                phase,
                from: AppState::Preparing,
                to: AppState::PreStart,
            });
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
