//! # Snapshot Collector
//!
//! One poll's complete readiness picture. A snapshot is built fresh on every
//! tick from the live registry listing and never mutated afterwards.

use crate::{ComponentId, ComponentRegistry};
use serde::Serialize;
use std::collections::BTreeMap;

/// Readiness of every known component at a single poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessSnapshot {
    states: BTreeMap<ComponentId, bool>,
    failed: Vec<ComponentId>,
}

impl ReadinessSnapshot {
    /// Poll `registry`, skipping the host identity.
    ///
    /// The mapping always reflects the live component set, so components
    /// may appear or vanish between polls.
    #[must_use]
    pub fn collect<R: ComponentRegistry + ?Sized>(registry: &R, host: &ComponentId) -> Self {
        let listing = registry.components();
        let mut states = BTreeMap::new();
        let mut discovered = Vec::with_capacity(listing.len());

        for status in listing {
            if &status.id == host {
                continue;
            }
            // Duplicate names collapse; the last report wins.
            if states.insert(status.id.clone(), status.ready).is_none() {
                discovered.push(status.id);
            }
        }

        let failed = discovered
            .into_iter()
            .filter(|id| states.get(id) == Some(&false))
            .collect();

        Self { states, failed }
    }

    /// The component → ready mapping.
    #[must_use]
    pub fn states(&self) -> &BTreeMap<ComponentId, bool> {
        &self.states
    }

    /// Components not ready at this poll, in discovery order.
    #[must_use]
    pub fn failed(&self) -> &[ComponentId] {
        &self.failed
    }

    /// True iff no component is currently not ready (vacuously true when
    /// the registry is empty).
    #[must_use]
    pub fn all_ready(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of components observed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no component was observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Consume the snapshot, keeping only its mapping.
    #[must_use]
    pub fn into_states(self) -> BTreeMap<ComponentId, bool> {
        self.states
    }
}

// =============================================================================
// TESTS
// =============================================================================
