pub mod catalog;
pub mod clock;
pub mod error;
pub mod lifecycle;
pub mod marker;
pub mod metrics;
pub mod timefile;

pub use catalog::InstanceCatalog;
pub use clock::{Clock, ClockHandle, SystemClock};
pub use error::CoreError;
pub use lifecycle::LifecycleOrchestrator;
pub use marker::{MarkReport, SkipMarkerReconciler};
pub use metrics::{MetricsBackend, MetricsHandle, NoOpMetrics, noop_metrics};
pub use timefile::{TimefileStore, UpdateOutcome};
