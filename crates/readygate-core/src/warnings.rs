//! # Failure Warnings
//!
//! Warn-once bookkeeping. The warned set only grows: a component that goes
//! failed → ready → failed is still warned about a single time.

use crate::{ComponentId, ReadinessLog};
use std::collections::BTreeSet;

/// Record of components already warned about.
#[derive(Debug, Clone, Default)]
pub struct WarnedSet {
    warned: BTreeSet<ComponentId>,
}

impl WarnedSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Warn about every id in `failed` not warned before, in order.
    ///
    /// Returns the ids warned about during this call.
    pub fn warn_new<L: ReadinessLog + ?Sized>(
        &mut self,
        failed: &[ComponentId],
        log: &L,
    ) -> Vec<ComponentId> {
        let mut newly = Vec::new();
        for id in failed {
            if self.warned.insert(id.clone()) {
                log.warn(&format!(
                    "Component '{}' failed to become ready; continuing with startup.",
                    id
                ));
                newly.push(id.clone());
            }
        }
        newly
    }

    /// Whether `id` has been warned about.
    #[must_use]
    pub fn contains(&self, id: &ComponentId) -> bool {
        self.warned.contains(id)
    }

    /// Number of warned components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.warned.len()
    }

    /// Whether nothing has been warned about.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warned.is_empty()
    }

    /// Iterate warned ids in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentId> {
        self.warned.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================
