//! Prometheus metrics backend for the warden lifecycle controller.
//!
//! This crate provides a [`PrometheusMetrics`] implementation of
//! [`warden_core::MetricsBackend`] that exposes request counters in
//! Prometheus format.
//!
//! ## Metrics
//! - `warden_listings_total` - Counter
//! - `warden_extensions_total{applied}` - Counter
//! - `warden_launches_total{action}` - Counter
//! - `warden_failures_total{kind}` - Counter
//!
//! ## HTTP Server
//! This crate does NOT provide an HTTP server for the `/metrics` endpoint.
//! Use the application's existing HTTP framework:
//!
//! ```rust,ignore
//! // Example with axum
//! async fn metrics_handler(metrics: Arc<PrometheusMetrics>) -> Response {
//!     let families = metrics.gather();
//!     let encoder = prometheus::TextEncoder::new();
//!     let mut buffer = vec![];
//!     encoder.encode(&families, &mut buffer).unwrap();
//!     Response::builder()
//!         .header("Content-Type", encoder.format_type())
//!         .body(buffer.into())
//!         .unwrap()
//! }
//! ```

mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
