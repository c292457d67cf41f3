use crate::metrics::backend::MetricsBackend;

/// No-op metrics backend that compiles to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    #[inline(always)]
    fn record_listing(&self) {}

    #[inline(always)]
    fn record_extension(&self, _: bool) {}

    #[inline(always)]
    fn record_launch(&self, _: &str) {}

    #[inline(always)]
    fn record_failure(&self, _: &str) {}
}
