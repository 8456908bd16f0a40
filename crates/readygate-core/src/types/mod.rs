//! # Core Type Definitions
//!
//! This module contains the shared types of the readygate coordinator:
//! - Component identifiers (`ComponentId`)
//! - Registry report entries (`ComponentStatus`)
//! - Error types (`CoordinatorError`)
//!
//! ## Determinism Guarantees
//!
//! All identifiers implement `Ord` so they can key `BTreeMap`/`BTreeSet`
//! and every ordered output of the coordinator is reproducible.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// COMPONENT IDENTIFIERS
// =============================================================================

/// Opaque unique name of one observed component.
///
/// Stable for the lifetime of a coordinator. Two ids are the same component
/// if and only if their names are byte-for-byte equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub String);

impl ComponentId {
    /// Create a new component id from a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ComponentId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// =============================================================================
// REGISTRY ENTRIES
// =============================================================================

/// One entry of a registry listing: a component and whether it reports ready.
///
/// There is no distinction between "failed permanently" and "still
/// initializing": both are `ready == false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentStatus {
    /// The component being reported.
    pub id: ComponentId,
    /// Whether the component currently reports itself enabled.
    pub ready: bool,
}

impl ComponentStatus {
    /// Create a new status entry.
    #[must_use]
    pub fn new(id: impl Into<ComponentId>, ready: bool) -> Self {
        Self {
            id: id.into(),
            ready,
        }
    }

    /// Shorthand for a ready component.
    #[must_use]
    pub fn ready(id: impl Into<ComponentId>) -> Self {
        Self::new(id, true)
    }

    /// Shorthand for a component that is not ready.
    #[must_use]
    pub fn not_ready(id: impl Into<ComponentId>) -> Self {
        Self::new(id, false)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised while building a coordinator.
///
/// A component that is not ready is never an error; it is observed and
/// logged. Only construction and configuration can fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinatorError {
    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The host identity used to exclude the coordinator itself is empty.
    #[error("Host component id must not be empty")]
    HostIdEmpty,
}

// =============================================================================
// TESTS
// =============================================================================
