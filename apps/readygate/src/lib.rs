//! # readygate
//!
//! Host process for the readygate coordinator.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  apps/readygate (THE BINARY)                 │
//! │                                                              │
//! │  ┌───────────┐   ┌───────────────────┐   ┌───────────────┐  │
//! │  │   CLI     │   │ IntervalScheduler │   │ TracingLog /  │  │
//! │  │  (clap)   │   │     (tokio)       │   │ Notifier      │  │
//! │  └─────┬─────┘   └─────────┬─────────┘   └───────┬───────┘  │
//! │        │                   │                     │          │
//! │        └───────────────────┼─────────────────────┘          │
//! │                            ▼                                │
//! │                   ┌────────────────┐                        │
//! │                   │ readygate-core │                        │
//! │                   │  (THE LOGIC)   │                        │
//! │                   └────────────────┘                        │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod registry;

pub use config::HostConfig;
pub use error::HostError;
