//! # Host Configuration
//!
//! Loaded from TOML. Example:
//!
//! ```toml
//! [host]
//! name = "readygate"
//! tick_interval_ms = 50
//!
//! [coordinator]
//! initial_delay_ticks = 1
//! stable_ticks_required = 20
//!
//! [[components]]
//! name = "worlds"
//! ready_after_ms = 300
//!
//! [[components]]
//! name = "economy"          # never becomes ready
//! ```

use crate::error::HostError;
use readygate_core::{ComponentId, ComponentStatus, CoordinatorConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "readygate.toml";

/// Default host identity.
pub const DEFAULT_HOST_NAME: &str = "readygate";

/// Default tick period: 20 Hz.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;

// =============================================================================
// SECTIONS
// =============================================================================

/// Full host configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    pub host: HostSection,
    pub coordinator: CoordinatorConfig,
    pub components: Vec<ScriptedComponent>,
}

/// `[host]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostSection {
    /// Identity the coordinator is registered under; never polled.
    pub name: String,
    /// Scheduler tick period in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for HostSection {
    fn default() -> Self {
        Self {
            name: DEFAULT_HOST_NAME.to_string(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

/// A `[[components]]` entry: a component whose lifecycle is scripted by
/// elapsed time since host start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptedComponent {
    pub name: String,
    /// When the component shows up in the registry.
    #[serde(default)]
    pub register_after_ms: u64,
    /// When it reports ready. Absent means never.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_after_ms: Option<u64>,
    /// When it leaves the registry, if ever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unregister_after_ms: Option<u64>,
}

impl ScriptedComponent {
    /// Registry entry for this component at `elapsed_ms`, if registered.
    #[must_use]
    pub fn status_at(&self, elapsed_ms: u64) -> Option<ComponentStatus> {
        let registered = elapsed_ms >= self.register_after_ms
            && self.unregister_after_ms.is_none_or(|until| elapsed_ms < until);
        if !registered {
            return None;
        }
        let ready = self.ready_after_ms.is_some_and(|at| elapsed_ms >= at);
        Some(ComponentStatus::new(self.name.as_str(), ready))
    }
}

// =============================================================================
// LOADING
// =============================================================================

/// CLI values that take precedence over the file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub stable_ticks: Option<u32>,
    pub initial_delay_ticks: Option<u64>,
    pub tick_interval_ms: Option<u64>,
}

impl HostConfig {
    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, HostError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read if present and built-in defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, HostError> {
        let path: PathBuf = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                fallback
            }
        };

        tracing::debug!("Loading configuration from {}", path.display());
        let text = std::fs::read_to_string(&path)?;
        Self::from_toml(&text)
    }

    /// Apply CLI overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(stable) = overrides.stable_ticks {
            self.coordinator.stable_ticks_required = stable;
        }
        if let Some(delay) = overrides.initial_delay_ticks {
            self.coordinator.initial_delay_ticks = delay;
        }
        if let Some(ms) = overrides.tick_interval_ms {
            self.host.tick_interval_ms = ms;
        }
        self
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), HostError> {
        if self.host.name.is_empty() {
            return Err(HostError::InvalidConfig(
                "host.name must not be empty".to_string(),
            ));
        }
        if self.host.tick_interval_ms == 0 {
            return Err(HostError::InvalidConfig(
                "host.tick_interval_ms must be greater than 0".to_string(),
            ));
        }
        self.coordinator.validate()?;

        let mut seen = BTreeSet::new();
        for component in &self.components {
            if component.name.is_empty() {
                return Err(HostError::InvalidConfig(
                    "component name must not be empty".to_string(),
                ));
            }
            if component.name == self.host.name {
                return Err(HostError::InvalidConfig(format!(
                    "component '{}' has the host's own name",
                    component.name
                )));
            }
            if !seen.insert(component.name.as_str()) {
                return Err(HostError::InvalidConfig(format!(
                    "component '{}' is listed twice",
                    component.name
                )));
            }
        }
        Ok(())
    }

    /// Host identity as a component id.
    #[must_use]
    pub fn host_id(&self) -> ComponentId {
        ComponentId::new(self.host.name.as_str())
    }
}

// =============================================================================
// TESTS
// =============================================================================
