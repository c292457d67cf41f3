use std::sync::Arc;

/// Backend metrics collection interface.
///
/// This trait abstracts metrics collection across different backends.
/// All label values passed in are bounded (low cardinality).
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record a catalog listing request.
    fn record_listing(&self);

    /// Record an extend-expiry request.
    ///
    /// # Arguments
    /// - `applied`: whether the timefile actually advanced
    fn record_extension(&self, applied: bool);

    /// Record a start/stop dispatch to the deployment tool.
    ///
    /// # Arguments
    /// - `action`: "start" or "stop"
    fn record_launch(&self, action: &str);

    /// Record a failed request.
    ///
    /// # Arguments
    /// - `kind`: error category, e.g. "listing", "persistence"
    fn record_failure(&self, kind: &str);
}

/// Shared handle to a metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;
