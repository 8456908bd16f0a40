//! # Stability-Detection Coordinator
//!
//! Waits for a set of independently-initializing components to settle, then
//! starts the application state exactly once.
//!
//! ## Why polling
//!
//! The components expose a readiness flag and nothing else: there is no
//! completion callback to subscribe to. The coordinator therefore samples the
//! registry on every tick and treats "no change for N consecutive ticks, and
//! nothing currently not ready" as settled.
//!
//! ## Tick pipeline
//!
//! ```text
//! registry ──► Snapshot ──► StabilityTracker ──► WarnedSet ──► TransitionGate
//!              (collect)    (diff / counter)     (warn once)   (fire once)
//! ```
//!
//! Each tick runs the four steps in order without suspending. A component
//! that never becomes ready keeps the gate waiting forever; there is no
//! timeout.

use crate::{
    ComponentId, ComponentRegistry, CoordinatorConfig, CoordinatorError, DownstreamInitializer,
    GateState, ReadinessChange, ReadinessLog, ReadinessSnapshot, StabilityTracker, Tick,
    TickControl, TransitionGate, WarnedSet,
};
use serde::Serialize;

// =============================================================================
// REPORTS
// =============================================================================

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// 1-based index of the poll performed, or the last poll if none was.
    pub poll: u64,
    /// Whether the registry was polled. False once the gate has fired.
    pub polled: bool,
    /// Stability counter after this tick.
    pub stable_ticks: u32,
    /// Differences against the previous poll.
    pub changes: Vec<ReadinessChange>,
    /// Components warned about for the first time on this tick.
    pub newly_warned: Vec<ComponentId>,
    /// Whether this tick fired the gate.
    pub fired: bool,
    /// What the scheduler should do next.
    pub control: TickControl,
}

/// Point-in-time view of the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoordinatorStatus {
    pub host: ComponentId,
    pub state: GateState,
    pub polls: u64,
    pub stable_ticks: u32,
    pub stable_ticks_required: u32,
    /// Components ever warned about, in name order.
    pub warned: Vec<ComponentId>,
    /// Components not ready at the last poll, in discovery order.
    pub pending: Vec<ComponentId>,
}

// =============================================================================
// COORDINATOR
// =============================================================================

/// Polls a registry until its components settle, then fires once.
///
/// Collaborators are injected: `R` lists components, `L` receives warnings
/// and the summary line, `I` is started when the gate fires.
pub struct Coordinator<R, L, I> {
    host: ComponentId,
    config: CoordinatorConfig,
    registry: R,
    log: L,
    initializer: I,
    tracker: StabilityTracker,
    warned: WarnedSet,
    gate: TransitionGate,
    polls: u64,
    pending: Vec<ComponentId>,
}

impl<R, L, I> Coordinator<R, L, I>
where
    R: ComponentRegistry,
    L: ReadinessLog,
    I: DownstreamInitializer,
{
    /// Create a waiting coordinator for `host`.
    ///
    /// `host` is the identity the coordinator itself is registered under; it
    /// is never polled.
    pub fn new(
        host: impl Into<ComponentId>,
        config: CoordinatorConfig,
        registry: R,
        log: L,
        initializer: I,
    ) -> Result<Self, CoordinatorError> {
        let host = host.into();
        if host.as_str().is_empty() {
            return Err(CoordinatorError::HostIdEmpty);
        }
        config.validate()?;

        Ok(Self {
            host,
            config,
            registry,
            log,
            initializer,
            tracker: StabilityTracker::new(),
            warned: WarnedSet::new(),
            gate: TransitionGate::new(config.stable_ticks_required),
            polls: 0,
            pending: Vec::new(),
        })
    }

    /// Run one tick: collect, track, warn, gate.
    pub fn poll(&mut self) -> TickReport {
        if self.gate.is_fired() {
            return TickReport {
                poll: self.polls,
                polled: false,
                stable_ticks: self.tracker.stable_ticks(),
                changes: Vec::new(),
                newly_warned: Vec::new(),
                fired: false,
                control: TickControl::Cancel,
            };
        }

        self.polls = self.polls.saturating_add(1);
        let snapshot = ReadinessSnapshot::collect(&self.registry, &self.host);
        let all_ready = snapshot.all_ready();
        self.pending = snapshot.failed().to_vec();

        let changes = self.tracker.observe(snapshot.into_states());
        for change in &changes {
            self.log
                .debug(&format!("Readiness change at poll {}: {}", self.polls, change));
        }

        let newly_warned = self.warned.warn_new(&self.pending, &self.log);

        let stable_ticks = self.tracker.stable_ticks();
        let fired = self.gate.try_fire(stable_ticks, all_ready);
        if fired {
            self.proceed();
        }

        TickReport {
            poll: self.polls,
            polled: true,
            stable_ticks,
            changes,
            newly_warned,
            fired,
            control: if fired {
                TickControl::Cancel
            } else {
                TickControl::Continue
            },
        }
    }

    fn proceed(&mut self) {
        if self.warned.is_empty() {
            self.log.info(
                "All components have finished initializing successfully. Setting up application state.",
            );
        } else {
            self.log.info(&format!(
                "All components have finished initializing. Setting up application state with {} failed component(s).",
                self.warned.len()
            ));
        }
        self.initializer.begin();
    }

    /// Snapshot of the coordinator's bookkeeping.
    #[must_use]
    pub fn status(&self) -> CoordinatorStatus {
        CoordinatorStatus {
            host: self.host.clone(),
            state: self.gate.state(),
            polls: self.polls,
            stable_ticks: self.tracker.stable_ticks(),
            stable_ticks_required: self.gate.threshold(),
            warned: self.warned.iter().cloned().collect(),
            pending: self.pending.clone(),
        }
    }

    /// Gate state.
    #[must_use]
    pub fn state(&self) -> GateState {
        self.gate.state()
    }

    /// Whether the transition has happened.
    #[must_use]
    pub fn is_fired(&self) -> bool {
        self.gate.is_fired()
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Host identity.
    #[must_use]
    pub fn host(&self) -> &ComponentId {
        &self.host
    }

    /// Borrow the initializer (e.g. to inspect it after firing).
    #[must_use]
    pub fn initializer(&self) -> &I {
        &self.initializer
    }

    /// Consume the coordinator, returning its initializer.
    #[must_use]
    pub fn into_initializer(self) -> I {
        self.initializer
    }
}

impl<R, L, I> Tick for Coordinator<R, L, I>
where
    R: ComponentRegistry,
    L: ReadinessLog,
    I: DownstreamInitializer,
{
    fn tick(&mut self) -> TickControl {
        self.poll().control
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryRegistry, NullLog};
    use std::cell::RefCell;
    use std::sync::Arc;

    #[derive(Default)]
    struct Lines {
        warn: RefCell<Vec<String>>,
        info: RefCell<Vec<String>>,
        debug: RefCell<Vec<String>>,
    }

    impl ReadinessLog for Lines {
        fn warn(&self, message: &str) {
            self.warn.borrow_mut().push(message.to_string());
        }
        fn info(&self, message: &str) {
            self.info.borrow_mut().push(message.to_string());
        }
        fn debug(&self, message: &str) {
            self.debug.borrow_mut().push(message.to_string());
        }
    }

    #[derive(Default)]
    struct Counter(u32);

    impl DownstreamInitializer for Counter {
        fn begin(&mut self) {
            self.0 += 1;
        }
    }

    fn config(threshold: u32) -> CoordinatorConfig {
        CoordinatorConfig::default().with_stable_ticks(threshold)
    }

    #[test]
    fn rejects_empty_host() {
        let result = Coordinator::new(
            "",
            config(1),
            InMemoryRegistry::new(),
            NullLog,
            Counter::default(),
        );
        assert!(matches!(result, Err(CoordinatorError::HostIdEmpty)));
    }

    #[test]
    fn rejects_invalid_config() {
        let result = Coordinator::new(
            "host",
            config(0),
            InMemoryRegistry::new(),
            NullLog,
            Counter::default(),
        );
        assert!(matches!(result, Err(CoordinatorError::InvalidConfig(_))));
    }

    #[test]
    fn fires_once_then_cancels() {
        let registry = InMemoryRegistry::new();
        registry.set("a", true);
        let mut coordinator =
            Coordinator::new("host", config(2), registry, NullLog, Counter::default())
                .expect("coordinator");

        assert_eq!(coordinator.tick(), TickControl::Continue); // change
        assert_eq!(coordinator.tick(), TickControl::Continue); // 1
        let report = coordinator.poll(); // 2
        assert!(report.fired);
        assert_eq!(report.control, TickControl::Cancel);

        let after = coordinator.poll();
        assert!(!after.polled);
        assert!(!after.fired);
        assert_eq!(after.control, TickControl::Cancel);
        assert_eq!(after.poll, 3);
        assert_eq!(coordinator.initializer().0, 1);
    }

    #[test]
    fn summary_counts_warned_failures() {
        let registry = Arc::new(InMemoryRegistry::new());
        registry.set("slow", false);
        let log = Lines::default();
        let mut coordinator = Coordinator::new(
            "host",
            config(1),
            Arc::clone(&registry),
            &log,
            Counter::default(),
        )
        .expect("coordinator");

        coordinator.poll();
        registry.set("slow", true);
        coordinator.poll();
        assert!(coordinator.poll().fired);

        assert_eq!(log.warn.borrow().len(), 1);
        assert!(log.info.borrow()[0].contains("with 1 failed component(s)"));
        assert_eq!(log.debug.borrow().len(), 2);
    }

    #[test]
    fn clean_summary_without_failures() {
        let log = Lines::default();
        let mut coordinator = Coordinator::new(
            "host",
            config(1),
            InMemoryRegistry::new(),
            &log,
            Counter::default(),
        )
        .expect("coordinator");

        assert!(coordinator.poll().fired);
        assert!(log.info.borrow()[0].contains("successfully"));
        assert!(log.warn.borrow().is_empty());
    }

    #[test]
    fn status_tracks_pending_and_warned() {
        let registry = InMemoryRegistry::new();
        registry.set("a", false);
        registry.set("b", true);
        let mut coordinator =
            Coordinator::new("host", config(5), registry, NullLog, Counter::default())
                .expect("coordinator");

        coordinator.poll();
        let status = coordinator.status();
        assert_eq!(status.state, GateState::Waiting);
        assert_eq!(status.polls, 1);
        assert_eq!(status.pending, vec![ComponentId::from("a")]);
        assert_eq!(status.warned, vec![ComponentId::from("a")]);
        assert_eq!(status.stable_ticks_required, 5);
    }
}
