use serde::{Deserialize, Serialize};

/// Wire body of `POST /extendtime`.
///
/// Fields arrive unvalidated; the handler turns them into
/// [`crate::InstanceName`] and [`crate::ExtendDays`] before any filesystem
/// path is derived from them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtendRequest {
    /// Name of the instance to keep alive.
    pub server: String,
    /// Number of days to extend by.
    pub days: i64,
}

/// Result of a completed extend-expiry operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtendOutcome {
    /// Instance the extension was applied to.
    pub instance: String,
    /// Days requested by the caller.
    pub days: i64,
    /// Expiry timestamp (epoch seconds) now authoritative for the instance.
    ///
    /// This is the proposed value when the update applied, or the already
    /// stored later value when it did not.
    pub effective_expiry: i64,
    /// Whether the timefile actually advanced.
    pub applied: bool,
    /// Number of sub-units the marker reconciler processed.
    pub subunits_marked: usize,
    /// Number of processed sub-units whose marker could not be created.
    ///
    /// Non-zero means a partial pass: the expiry update above still stands.
    pub subunits_failed: usize,
}
