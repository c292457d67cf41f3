use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock source used to compute proposed expiry timestamps.
///
/// The orchestrator only ever needs "now" as whole epoch seconds; putting it
/// behind a trait keeps expiry arithmetic deterministic in tests.
pub trait Clock: Send + Sync + 'static {
    /// Current wall-clock time as seconds since the Unix epoch.
    fn now_epoch_seconds(&self) -> i64;
}

/// Shared handle to a clock implementation.
pub type ClockHandle = Arc<dyn Clock>;

/// Production clock backed by [`SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_seconds(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_secs() as i64,
            // Clock set before the epoch: represent as negative seconds.
            Err(e) => -(e.duration().as_secs() as i64),
        }
    }
}
