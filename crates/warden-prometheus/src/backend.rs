use std::sync::Arc;

use prometheus::{Counter, CounterVec, Opts, Registry, proto::MetricFamily};

use warden_core::MetricsBackend;

/// Prometheus metrics backend for the lifecycle controller.
///
/// Implements [`MetricsBackend`] and exposes request counters that can be
/// scraped via an HTTP endpoint.
///
/// ## Label cardinality
/// All labels are bounded (low cardinality):
/// - `applied`: "true", "false"
/// - `action`: "start", "stop"
/// - `kind`: "invalid_request", "listing", "internal"
#[derive(Clone)]
pub struct PrometheusMetrics {
    listings: Counter,
    extensions: CounterVec,
    launches: CounterVec,
    failures: CounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Create a new prometheus metrics backend with custom registry.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let listings = Counter::with_opts(Opts::new(
            "listings_total",
            "Total number of catalog listing requests",
        )
        .namespace("warden"))?;
        registry.register(Box::new(listings.clone()))?;

        let extensions = CounterVec::new(
            Opts::new(
                "extensions_total",
                "Total number of extend-expiry requests",
            )
            .namespace("warden"),
            &["applied"],
        )?;
        registry.register(Box::new(extensions.clone()))?;

        let launches = CounterVec::new(
            Opts::new("launches_total", "Total number of deployment dispatches")
                .namespace("warden"),
            &["action"],
        )?;
        registry.register(Box::new(launches.clone()))?;

        let failures = CounterVec::new(
            Opts::new("failures_total", "Total number of failed requests").namespace("warden"),
            &["kind"],
        )?;
        registry.register(Box::new(failures.clone()))?;

        Ok(Self {
            listings,
            extensions,
            launches,
            failures,
            registry,
        })
    }

    /// Create a new prometheus metrics backend with default registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    /// Gather all metrics for exposition.
    ///
    /// Use this to implement a `/metrics` HTTP endpoint.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Get reference to underlying prometheus registry.
    ///
    /// Useful for registering custom metrics alongside warden metrics.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_listing(&self) {
        self.listings.inc();
    }

    fn record_extension(&self, applied: bool) {
        let label = if applied { "true" } else { "false" };
        self.extensions.with_label_values(&[label]).inc();
    }

    fn record_launch(&self, action: &str) {
        self.launches.with_label_values(&[action]).inc();
    }

    fn record_failure(&self, kind: &str) {
        self.failures.with_label_values(&[kind]).inc();
    }
}
