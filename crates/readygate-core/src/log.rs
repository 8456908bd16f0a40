//! # Logger Collaborator
//!
//! The core has no logging dependency. Hosts implement [`ReadinessLog`]
//! over whatever logging stack they run (the readygate binary maps it onto
//! `tracing`).

/// Text sink for coordinator messages.
pub trait ReadinessLog {
    /// A component was observed not ready.
    fn warn(&self, message: &str);

    /// Lifecycle messages such as the transition summary.
    fn info(&self, message: &str);

    /// Per-poll detail (observed changes). Ignored unless overridden.
    fn debug(&self, _message: &str) {}
}

impl<L: ReadinessLog + ?Sized> ReadinessLog for &L {
    fn warn(&self, message: &str) {
        (**self).warn(message);
    }

    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn debug(&self, message: &str) {
        (**self).debug(message);
    }
}

/// Logger that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLog;

impl ReadinessLog for NullLog {
    fn warn(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
}
