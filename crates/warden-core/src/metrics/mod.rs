//! Metrics collection abstraction for the controller.
//!
//! The request handlers record coarse counters through [`MetricsBackend`].
//! Backends (prometheus, statsd, etc) implement the trait and are injected
//! where requests are served.
mod backend;
pub use backend::{MetricsBackend, MetricsHandle};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
