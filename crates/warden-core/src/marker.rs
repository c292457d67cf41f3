use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use warden_model::{DATA_DIR_NAME, InstanceName, SKIP_MARKER_FILE};

use crate::error::CoreError;

/// One sub-unit the reconciler could not mark.
#[derive(Debug, Clone)]
pub struct MarkFailure {
    /// Sub-unit directory name.
    pub subunit: String,
    /// I/O error text for the failed create.
    pub reason: String,
}

/// Outcome of a marker reconciliation pass.
#[derive(Debug, Clone, Default)]
pub struct MarkReport {
    /// Number of sub-units processed (not the number newly created).
    pub processed: usize,
    /// Sub-units whose marker could not be created.
    pub failures: Vec<MarkFailure>,
}

impl MarkReport {
    /// Whether every processed sub-unit got its marker.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ensures every sub-unit of an instance carries the autostop-exemption
/// marker.
///
/// Sub-units are the direct subdirectories of
/// `<root>/<instance>/data/`, discovered fresh on every call. Marking is
/// best-effort: a failure on one sub-unit is recorded and the rest are still
/// processed.
pub struct SkipMarkerReconciler {
    root: PathBuf,
}

impl SkipMarkerReconciler {
    /// Create a reconciler over the catalog root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Data directory of `name`.
    pub fn data_dir(&self, name: &InstanceName) -> PathBuf {
        self.root.join(name.as_str()).join(DATA_DIR_NAME)
    }

    /// Create the marker file in every sub-unit of `name`.
    ///
    /// A missing data directory is a valid state (the instance has never
    /// been started) and yields an empty report. An unreadable existing path
    /// is a [`CoreError::Reconciliation`]. An entry that cannot be stat-ed
    /// is recorded as a [`MarkFailure`], never skipped silently. Creating a
    /// marker that already exists succeeds without altering it.
    pub async fn mark_all(&self, name: &InstanceName) -> Result<MarkReport, CoreError> {
        let data_dir = self.data_dir(name);

        let mut entries = match fs::read_dir(&data_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(instance = %name, "no data directory yet, nothing to mark");
                return Ok(MarkReport::default());
            }
            Err(e) => {
                return Err(CoreError::Reconciliation {
                    path: data_dir,
                    source: e,
                });
            }
        };

        let mut report = MarkReport::default();
        while let Some(entry) = entries.next_entry().await.map_err(|e| CoreError::Reconciliation {
            path: data_dir.clone(),
            source: e,
        })? {
            let subunit = entry.file_name().to_string_lossy().into_owned();
            // Follows symlinks, so a linked sub-unit directory still counts.
            let is_dir = match fs::metadata(entry.path()).await {
                Ok(meta) => meta.is_dir(),
                Err(e) => {
                    warn!(
                        instance = %name,
                        subunit = %subunit,
                        error = %e,
                        "cannot stat data entry"
                    );
                    report.processed += 1;
                    report.failures.push(MarkFailure {
                        subunit,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            if !is_dir {
                continue;
            }
            let marker = entry.path().join(SKIP_MARKER_FILE);

            report.processed += 1;
            match touch(&marker).await {
                Ok(()) => debug!(instance = %name, marker = %marker.display(), "skip marker ensured"),
                Err(e) => {
                    warn!(
                        instance = %name,
                        subunit = %subunit,
                        error = %e,
                        "failed to create skip marker"
                    );
                    report.failures.push(MarkFailure {
                        subunit,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}

/// Idempotent presence-only create: an existing marker is left as-is.
async fn touch(path: &Path) -> std::io::Result<()> {
    fs::OpenOptions::new()
        .create(true)
        .write(true)
        .open(path)
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use std::fs as std_fs;

    use super::SkipMarkerReconciler;
    use crate::error::CoreError;
    use warden_model::{InstanceName, SKIP_MARKER_FILE};

    fn alice() -> InstanceName {
        InstanceName::new("alice").unwrap()
    }

    #[tokio::test]
    async fn marks_every_subunit() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("alice").join("data");
        std_fs::create_dir_all(data.join("world")).unwrap();
        std_fs::create_dir_all(data.join("nether")).unwrap();

        let reconciler = SkipMarkerReconciler::new(dir.path());
        let report = reconciler.mark_all(&alice()).await.unwrap();

        assert_eq!(report.processed, 2);
        assert!(report.is_clean());
        assert!(data.join("world").join(SKIP_MARKER_FILE).exists());
        assert!(data.join("nether").join(SKIP_MARKER_FILE).exists());
    }

    #[tokio::test]
    async fn marking_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("alice").join("data");
        std_fs::create_dir_all(data.join("world")).unwrap();

        let reconciler = SkipMarkerReconciler::new(dir.path());
        let first = reconciler.mark_all(&alice()).await.unwrap();
        let second = reconciler.mark_all(&alice()).await.unwrap();

        assert_eq!(first.processed, 1);
        assert_eq!(second.processed, 1);
        assert!(second.is_clean());

        let marker = data.join("world").join(SKIP_MARKER_FILE);
        assert_eq!(std_fs::metadata(&marker).unwrap().len(), 0);
    }

    #[tokio::test]
    async fn missing_data_dir_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::create_dir(dir.path().join("alice")).unwrap();

        let reconciler = SkipMarkerReconciler::new(dir.path());
        let report = reconciler.mark_all(&alice()).await.unwrap();

        assert_eq!(report.processed, 0);
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn plain_files_in_data_dir_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("alice").join("data");
        std_fs::create_dir_all(data.join("world")).unwrap();
        std_fs::write(data.join("server.properties"), "x").unwrap();

        let reconciler = SkipMarkerReconciler::new(dir.path());
        let report = reconciler.mark_all(&alice()).await.unwrap();

        assert_eq!(report.processed, 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unreadable_entry_is_reported_not_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("alice").join("data");
        std_fs::create_dir_all(data.join("world")).unwrap();
        // A dangling symlink cannot be stat-ed through.
        std::os::unix::fs::symlink(data.join("missing"), data.join("broken")).unwrap();

        let reconciler = SkipMarkerReconciler::new(dir.path());
        let report = reconciler.mark_all(&alice()).await.unwrap();

        assert_eq!(report.processed, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].subunit, "broken");
        // The healthy sub-unit was still marked.
        assert!(data.join("world").join(SKIP_MARKER_FILE).exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlinked_subunit_directory_is_marked() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("alice").join("data");
        std_fs::create_dir_all(data.join("world")).unwrap();
        std_fs::create_dir_all(dir.path().join("shared-world")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("shared-world"), data.join("linked")).unwrap();

        let reconciler = SkipMarkerReconciler::new(dir.path());
        let report = reconciler.mark_all(&alice()).await.unwrap();

        assert_eq!(report.processed, 2);
        assert!(report.is_clean());
        assert!(data.join("linked").join(SKIP_MARKER_FILE).exists());
    }

    #[tokio::test]
    async fn subunit_added_later_is_marked_on_next_pass() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("carol").join("data");
        std_fs::create_dir_all(data.join("p")).unwrap();

        let carol = InstanceName::new("carol").unwrap();
        let reconciler = SkipMarkerReconciler::new(dir.path());
        reconciler.mark_all(&carol).await.unwrap();

        std_fs::create_dir_all(data.join("q")).unwrap();
        let report = reconciler.mark_all(&carol).await.unwrap();

        assert_eq!(report.processed, 2);
        assert!(data.join("q").join(SKIP_MARKER_FILE).exists());
    }

    #[tokio::test]
    async fn data_dir_that_is_a_file_is_a_reconciliation_error() {
        let dir = tempfile::tempdir().unwrap();
        std_fs::create_dir(dir.path().join("alice")).unwrap();
        std_fs::write(dir.path().join("alice").join("data"), "x").unwrap();

        let reconciler = SkipMarkerReconciler::new(dir.path());
        let result = reconciler.mark_all(&alice()).await;

        assert!(matches!(result, Err(CoreError::Reconciliation { .. })));
    }
}
