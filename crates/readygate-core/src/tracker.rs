//! # Stability Tracker
//!
//! Debounce over readiness mappings. The counter measures how many
//! consecutive polls observed no change at all, not how many were ready.

use crate::ComponentId;
use serde::Serialize;
use std::collections::BTreeMap;

/// A single difference between two consecutive mappings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReadinessChange {
    /// A component not present in the baseline was observed.
    Appeared { id: ComponentId, ready: bool },
    /// A baseline component is no longer listed.
    Vanished { id: ComponentId },
    /// A component changed its readiness flag.
    Flipped { id: ComponentId, ready: bool },
}

impl std::fmt::Display for ReadinessChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Appeared { id, ready } => write!(f, "'{}' appeared (ready: {})", id, ready),
            Self::Vanished { id } => write!(f, "'{}' is no longer registered", id),
            Self::Flipped { id, ready } => write!(f, "'{}' is now ready: {}", id, ready),
        }
    }
}

/// Baseline mapping plus the consecutive-unchanged-polls counter.
#[derive(Debug, Clone, Default)]
pub struct StabilityTracker {
    baseline: BTreeMap<ComponentId, bool>,
    stable_ticks: u32,
}

impl StabilityTracker {
    /// Create a tracker with an empty baseline and a zero counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `current` against the baseline.
    ///
    /// On any difference the baseline is replaced and the counter reset to
    /// zero; otherwise the counter grows by one. Returns the differences,
    /// empty when the mapping was unchanged.
    pub fn observe(&mut self, current: BTreeMap<ComponentId, bool>) -> Vec<ReadinessChange> {
        if current == self.baseline {
            self.stable_ticks = self.stable_ticks.saturating_add(1);
            return Vec::new();
        }

        let changes = diff(&self.baseline, &current);
        self.baseline = current;
        self.stable_ticks = 0;
        changes
    }

    /// Consecutive polls without change since the last reset.
    #[must_use]
    pub fn stable_ticks(&self) -> u32 {
        self.stable_ticks
    }

    /// The last-observed mapping.
    #[must_use]
    pub fn baseline(&self) -> &BTreeMap<ComponentId, bool> {
        &self.baseline
    }
}

fn diff(
    previous: &BTreeMap<ComponentId, bool>,
    current: &BTreeMap<ComponentId, bool>,
) -> Vec<ReadinessChange> {
    let mut changes = Vec::new();

    for (id, &ready) in current {
        match previous.get(id) {
            None => changes.push(ReadinessChange::Appeared {
                id: id.clone(),
                ready,
            }),
            Some(&before) if before != ready => changes.push(ReadinessChange::Flipped {
                id: id.clone(),
                ready,
            }),
            Some(_) => {}
        }
    }

    for id in previous.keys() {
        if !current.contains_key(id) {
            changes.push(ReadinessChange::Vanished { id: id.clone() });
        }
    }

    changes
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: &[(&str, bool)]) -> BTreeMap<ComponentId, bool> {
        entries
            .iter()
            .map(|&(name, ready)| (ComponentId::from(name), ready))
            .collect()
    }

    #[test]
    fn unchanged_mapping_increments() {
        let mut tracker = StabilityTracker::new();
        tracker.observe(mapping(&[("a", true)]));
        assert_eq!(tracker.stable_ticks(), 0);

        assert!(tracker.observe(mapping(&[("a", true)])).is_empty());
        assert!(tracker.observe(mapping(&[("a", true)])).is_empty());
        assert_eq!(tracker.stable_ticks(), 2);
    }

    #[test]
    fn empty_first_poll_counts_as_unchanged() {
        let mut tracker = StabilityTracker::new();
        tracker.observe(BTreeMap::new());
        assert_eq!(tracker.stable_ticks(), 1);
    }

    #[test]
    fn flip_resets_counter() {
        let mut tracker = StabilityTracker::new();
        tracker.observe(mapping(&[("a", false)]));
        tracker.observe(mapping(&[("a", false)]));
        let changes = tracker.observe(mapping(&[("a", true)]));

        assert_eq!(tracker.stable_ticks(), 0);
        assert_eq!(
            changes,
            vec![ReadinessChange::Flipped {
                id: ComponentId::from("a"),
                ready: true
            }]
        );
        assert_eq!(tracker.baseline(), &mapping(&[("a", true)]));
    }

    #[test]
    fn key_set_change_resets_counter() {
        let mut tracker = StabilityTracker::new();
        tracker.observe(mapping(&[("a", true), ("b", true)]));
        tracker.observe(mapping(&[("a", true), ("b", true)]));

        let changes = tracker.observe(mapping(&[("a", true), ("c", true)]));
        assert_eq!(tracker.stable_ticks(), 0);
        assert_eq!(
            changes,
            vec![
                ReadinessChange::Appeared {
                    id: ComponentId::from("c"),
                    ready: true
                },
                ReadinessChange::Vanished {
                    id: ComponentId::from("b")
                },
            ]
        );
    }

    #[test]
    fn change_display() {
        let change = ReadinessChange::Vanished {
            id: ComponentId::from("a"),
        };
        assert_eq!(change.to_string(), "'a' is no longer registered");
    }
}
