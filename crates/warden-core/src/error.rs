use std::path::PathBuf;

use thiserror::Error;

use warden_model::ModelError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("cannot list catalog root {root}: {source}")]
    Listing {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown instance: {0}")]
    UnknownInstance(String),

    #[error("cannot persist timefile {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot reconcile markers under {path}: {source}")]
    Reconciliation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ModelError),
}

impl CoreError {
    /// Stable label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::Listing { .. } => "listing",
            CoreError::UnknownInstance(_) => "unknown_instance",
            CoreError::Persistence { .. } => "persistence",
            CoreError::Reconciliation { .. } => "reconciliation",
            CoreError::Invalid(_) => "invalid_input",
        }
    }
}
