use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::fs;
use tracing::{debug, info};

use warden_model::{InstanceName, TIMEFILE_NAME};

use crate::error::CoreError;

/// Unparseable timefile content counts as "no record".
///
/// Historical behavior of the autostop tooling, kept on purpose: a corrupt
/// timefile must not wedge extensions, and the next applied update rewrites
/// the file with a clean value.
pub const TREAT_UNPARSEABLE_AS_ABSENT: bool = true;

/// Result of a conditional timefile update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Whether the proposed value was written.
    pub applied: bool,
    /// The value that is authoritative after the call: the proposed value
    /// when applied, otherwise the already stored one.
    pub effective: i64,
}

/// Monotonic per-instance expiry persistence.
///
/// Each instance owns a single file at `<base>/<instance>/timefile` holding
/// one decimal epoch timestamp. Updates only ever move the value forward;
/// a proposal that does not exceed the stored value leaves the file
/// untouched.
///
/// The read-modify-write of one instance's timefile runs under a
/// per-instance async mutex, so two overlapping extends cannot interleave
/// and let a smaller value overwrite a larger one.
pub struct TimefileStore {
    base: PathBuf,
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl TimefileStore {
    /// Create a store rooted at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Path of the timefile for `name`.
    pub fn timefile_path(&self, name: &InstanceName) -> PathBuf {
        self.base.join(name.as_str()).join(TIMEFILE_NAME)
    }

    fn lock_for(&self, name: &InstanceName) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().expect("timefile lock map poisoned");
        locks
            .entry(name.as_str().to_owned())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Read the stored expiry for `name`, if any.
    ///
    /// A missing file and unparseable content both read as `None` (see
    /// [`TREAT_UNPARSEABLE_AS_ABSENT`]). A genuine I/O error on an existing
    /// file is a [`CoreError::Persistence`].
    pub async fn read(&self, name: &InstanceName) -> Result<Option<i64>, CoreError> {
        read_current(&self.timefile_path(name)).await
    }

    /// Conditionally advance the stored expiry for `name`.
    ///
    /// Writes `proposed` when no record exists or `proposed` is strictly
    /// greater than the stored value; otherwise the file stays untouched and
    /// the stored value is reported back as effective.
    pub async fn update(
        &self,
        name: &InstanceName,
        proposed: i64,
    ) -> Result<UpdateOutcome, CoreError> {
        let lock = self.lock_for(name);
        let _guard = lock.lock().await;

        let path = self.timefile_path(name);
        let current = read_current(&path).await?;

        match current {
            Some(stored) if proposed <= stored => {
                debug!(
                    instance = %name,
                    proposed,
                    stored,
                    "timefile already holds a later expiry, keeping it"
                );
                Ok(UpdateOutcome {
                    applied: false,
                    effective: stored,
                })
            }
            _ => {
                write_replace(&path, proposed).await?;
                info!(instance = %name, expiry = proposed, "timefile updated");
                Ok(UpdateOutcome {
                    applied: true,
                    effective: proposed,
                })
            }
        }
    }
}

async fn read_current(path: &Path) -> Result<Option<i64>, CoreError> {
    match fs::read_to_string(path).await {
        // TREAT_UNPARSEABLE_AS_ABSENT: parse failures read as "no record".
        Ok(raw) => Ok(raw.trim().parse::<i64>().ok()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CoreError::Persistence {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Replace the timefile content with `value`, creating parent directories.
///
/// The value is written to a sibling temp file first and renamed into place,
/// so a reader never observes a partially written timestamp.
async fn write_replace(path: &Path, value: i64) -> Result<(), CoreError> {
    let persistence = |e: std::io::Error| CoreError::Persistence {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(persistence)?;
    }

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, value.to_string()).await.map_err(persistence)?;
    fs::rename(&tmp, path).await.map_err(persistence)?;

    Ok(())
}
