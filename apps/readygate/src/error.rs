//! Host-level errors.

use readygate_core::CoordinatorError;
use thiserror::Error;

/// Errors surfaced by the readygate binary.
#[derive(Debug, Error)]
pub enum HostError {
    /// Reading the configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`crate::config::HostConfig`].
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The coordinator rejected its configuration.
    #[error(transparent)]
    Core(#[from] CoordinatorError),

    /// A host-level configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Shutdown was requested before the components settled.
    #[error("Interrupted before components settled ({pending} not ready)")]
    Interrupted { pending: usize },

    /// Rendering output failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
