//! # Component Registry
//!
//! The registry is the coordinator's only view of the components. It lists
//! every currently known component with its readiness flag; it offers no
//! completion callback, which is why the coordinator polls.

use crate::{ComponentId, ComponentStatus};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

// =============================================================================
// REGISTRY TRAIT
// =============================================================================

/// Source of component readiness.
///
/// Implementations must be a pure read: listing components has no side
/// effects and does not block. The listing may include the host itself;
/// the collector filters it out.
pub trait ComponentRegistry {
    /// List every currently registered component, in discovery order.
    fn components(&self) -> Vec<ComponentStatus>;
}

impl<R: ComponentRegistry + ?Sized> ComponentRegistry for &R {
    fn components(&self) -> Vec<ComponentStatus> {
        (**self).components()
    }
}

impl<R: ComponentRegistry + ?Sized> ComponentRegistry for Arc<R> {
    fn components(&self) -> Vec<ComponentStatus> {
        (**self).components()
    }
}

// =============================================================================
// IN-MEMORY REGISTRY
// =============================================================================

/// Registry backed by an in-process table.
///
/// Hosts that learn about component state through their own events can
/// mirror it here and hand an `Arc<InMemoryRegistry>` to the coordinator.
/// Listing order is registration order.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    entries: RwLock<Entries>,
}

#[derive(Debug, Default)]
struct Entries {
    order: Vec<ComponentId>,
    ready: BTreeMap<ComponentId, bool>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component or update its readiness.
    pub fn set(&self, id: impl Into<ComponentId>, ready: bool) {
        let id = id.into();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.ready.insert(id.clone(), ready).is_none() {
            entries.order.push(id);
        }
    }

    /// Remove a component. Returns `true` if it was registered.
    pub fn remove(&self, id: &ComponentId) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.ready.remove(id).is_some() {
            entries.order.retain(|known| known != id);
            true
        } else {
            false
        }
    }

    /// Number of registered components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .order
            .len()
    }

    /// Whether no component is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ComponentRegistry for InMemoryRegistry {
    fn components(&self) -> Vec<ComponentStatus> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .order
            .iter()
            .filter_map(|id| {
                entries
                    .ready
                    .get(id)
                    .map(|&ready| ComponentStatus::new(id.clone(), ready))
            })
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
