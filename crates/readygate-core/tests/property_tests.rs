//! # Property-Based Tests
//!
//! Invariants of the coordinator over arbitrary readiness histories,
//! checked with proptest.

use proptest::collection::vec;
use proptest::prelude::*;
use readygate_core::{
    ComponentId, ComponentRegistry, ComponentStatus, Coordinator, CoordinatorConfig,
    DownstreamInitializer, ReadinessLog,
};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// HARNESS
// =============================================================================

/// Replays one listing per poll; repeats the last listing afterwards.
struct Replay {
    polls: Vec<Vec<ComponentStatus>>,
    next: Cell<usize>,
}

impl Replay {
    fn new(polls: Vec<Vec<ComponentStatus>>) -> Self {
        Self {
            polls,
            next: Cell::new(0),
        }
    }
}

impl ComponentRegistry for Replay {
    fn components(&self) -> Vec<ComponentStatus> {
        let index = self.next.get();
        self.next.set(index + 1);
        self.polls
            .get(index)
            .or_else(|| self.polls.last())
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Default)]
struct Warnings(RefCell<Vec<String>>);

impl ReadinessLog for Warnings {
    fn warn(&self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
    fn info(&self, _message: &str) {}
}

#[derive(Default)]
struct Starts(u32);

impl DownstreamInitializer for Starts {
    fn begin(&mut self) {
        self.0 += 1;
    }
}

const NAMES: [&str; 4] = ["alpha", "beta", "gamma", "delta"];

fn listing() -> impl Strategy<Value = Vec<ComponentStatus>> {
    vec((0usize..NAMES.len(), any::<bool>()), 0..5).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(i, ready)| ComponentStatus::new(NAMES[i], ready))
            .collect()
    })
}

fn history() -> impl Strategy<Value = Vec<Vec<ComponentStatus>>> {
    vec(listing(), 1..60)
}

fn mapping(listing: &[ComponentStatus]) -> BTreeMap<ComponentId, bool> {
    listing
        .iter()
        .map(|status| (status.id.clone(), status.ready))
        .collect()
}

fn never_fires() -> CoordinatorConfig {
    CoordinatorConfig::default().with_stable_ticks(u32::MAX)
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Each component is warned about at most once, and every component ever
    /// observed not ready is warned about.
    #[test]
    fn warn_once_per_component(polls in history()) {
        let ever_failed: BTreeSet<ComponentId> = polls
            .iter()
            .flat_map(|listing| mapping(listing).into_iter())
            .filter(|(_, ready)| !ready)
            .map(|(id, _)| id)
            .collect();

        let log = Warnings::default();
        let count = polls.len();
        let mut coordinator =
            Coordinator::new("host", never_fires(), Replay::new(polls), &log, Starts::default())
                .expect("coordinator");
        for _ in 0..count {
            coordinator.poll();
        }

        let warnings = log.0.borrow();
        prop_assert_eq!(warnings.len(), ever_failed.len());
        for id in &ever_failed {
            let needle = format!("'{}'", id);
            prop_assert_eq!(warnings.iter().filter(|w| w.contains(&needle)).count(), 1);
        }
    }

    /// The counter resets on any mapping change and otherwise grows by one.
    #[test]
    fn counter_matches_debounce_model(polls in history()) {
        let expected: Vec<u32> = {
            let mut baseline = BTreeMap::new();
            let mut counter = 0u32;
            polls
                .iter()
                .map(|listing| {
                    let current = mapping(listing);
                    if current == baseline {
                        counter += 1;
                    } else {
                        baseline = current;
                        counter = 0;
                    }
                    counter
                })
                .collect()
        };

        let mut coordinator = Coordinator::new(
            "host",
            never_fires(),
            Replay::new(polls),
            Warnings::default(),
            Starts::default(),
        )
        .expect("coordinator");

        for want in expected {
            prop_assert_eq!(coordinator.poll().stable_ticks, want);
        }
    }

    /// Whatever happens first, a history that ends in a long enough ready
    /// plateau starts the application exactly once.
    #[test]
    fn fires_exactly_once_after_settling(
        mut polls in history(),
        threshold in 1u32..10,
        extra in 0u64..50
    ) {
        polls.push(vec![ComponentStatus::ready("alpha"), ComponentStatus::ready("beta")]);
        let total = polls.len() as u64 + u64::from(threshold) + extra;

        let mut coordinator = Coordinator::new(
            "host",
            CoordinatorConfig::default().with_stable_ticks(threshold),
            Replay::new(polls),
            Warnings::default(),
            Starts::default(),
        )
        .expect("coordinator");

        let mut fired = 0;
        for _ in 0..total {
            if coordinator.poll().fired {
                fired += 1;
            }
        }

        prop_assert_eq!(fired, 1);
        prop_assert_eq!(coordinator.initializer().0, 1);
        prop_assert!(coordinator.is_fired());
    }

    /// The gate never fires below the threshold, and fires on the first poll
    /// where the threshold is met with everything ready.
    #[test]
    fn fires_exactly_when_conditions_first_hold(
        polls in history(),
        threshold in 1u32..6
    ) {
        let count = polls.len();
        let listings = polls.clone();
        let mut coordinator = Coordinator::new(
            "host",
            CoordinatorConfig::default().with_stable_ticks(threshold),
            Replay::new(polls),
            Warnings::default(),
            Starts::default(),
        )
        .expect("coordinator");

        for listing in listings.iter().take(count) {
            let all_ready = mapping(listing).values().all(|&ready| ready);
            let report = coordinator.poll();
            prop_assert_eq!(report.fired, report.stable_ticks >= threshold && all_ready);
            if report.fired {
                break;
            }
        }
    }

    /// A component that never becomes ready keeps the gate waiting.
    #[test]
    fn permanent_failure_never_fires(polls in history(), threshold in 1u32..5) {
        let polls: Vec<Vec<ComponentStatus>> = polls
            .into_iter()
            .map(|mut listing| {
                listing.push(ComponentStatus::not_ready("stuck"));
                listing
            })
            .collect();
        let count = polls.len() as u64 + 200;

        let mut coordinator = Coordinator::new(
            "host",
            CoordinatorConfig::default().with_stable_ticks(threshold),
            Replay::new(polls),
            Warnings::default(),
            Starts::default(),
        )
        .expect("coordinator");

        for _ in 0..count {
            prop_assert!(!coordinator.poll().fired);
        }
        prop_assert_eq!(coordinator.initializer().0, 0);
    }
}
