use std::sync::Arc;

use tracing::{debug, info, warn};

use warden_model::{ExtendDays, ExtendOutcome, InstanceName};

use crate::catalog::InstanceCatalog;
use crate::clock::ClockHandle;
use crate::error::CoreError;
use crate::marker::SkipMarkerReconciler;
use crate::timefile::TimefileStore;

/// Facade over an extend-expiry request.
///
/// A single linear pipeline: check catalog membership, compute the proposed
/// expiry from the wall clock, persist it through [`TimefileStore`], then
/// reconcile skip markers through [`SkipMarkerReconciler`].
///
/// Reconciliation runs even when the timefile did not advance: sub-units
/// created since the last extension still need their marker. There is no
/// rollback either; a marking failure after a successful persist leaves the
/// new expiry in place.
pub struct LifecycleOrchestrator {
    catalog: Arc<InstanceCatalog>,
    store: Arc<TimefileStore>,
    reconciler: Arc<SkipMarkerReconciler>,
    clock: ClockHandle,
}

impl LifecycleOrchestrator {
    /// Wire the orchestrator from its collaborators.
    pub fn new(
        catalog: Arc<InstanceCatalog>,
        store: Arc<TimefileStore>,
        reconciler: Arc<SkipMarkerReconciler>,
        clock: ClockHandle,
    ) -> Self {
        Self {
            catalog,
            store,
            reconciler,
            clock,
        }
    }

    /// Extend the keep-alive expiry of `name` by `days`.
    ///
    /// Input shape validation already happened when `name` and `days` were
    /// constructed; this additionally rejects instances that are not present
    /// in the catalog, so no state is ever created for a name that nothing
    /// manages.
    pub async fn extend(
        &self,
        name: &InstanceName,
        days: ExtendDays,
    ) -> Result<ExtendOutcome, CoreError> {
        if !self.catalog.contains(name).await {
            return Err(CoreError::UnknownInstance(name.to_string()));
        }

        let now = self.clock.now_epoch_seconds();
        let proposed = now + days.as_seconds();

        let update = self.store.update(name, proposed).await?;
        if update.applied {
            info!(instance = %name, days = %days, expiry = update.effective, "expiry extended");
        } else {
            debug!(
                instance = %name,
                days = %days,
                expiry = update.effective,
                "expiry unchanged, stored value is later"
            );
        }

        let report = self.reconciler.mark_all(name).await?;
        if !report.is_clean() {
            warn!(
                instance = %name,
                failed = report.failures.len(),
                processed = report.processed,
                "marker reconciliation was only partial"
            );
        }

        Ok(ExtendOutcome {
            instance: name.to_string(),
            days: days.value(),
            effective_expiry: update.effective,
            applied: update.applied,
            subunits_marked: report.processed,
            subunits_failed: report.failures.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs as std_fs;
    use std::sync::Arc;

    use super::LifecycleOrchestrator;
    use crate::catalog::InstanceCatalog;
    use crate::clock::Clock;
    use crate::error::CoreError;
    use crate::marker::SkipMarkerReconciler;
    use crate::timefile::TimefileStore;
    use warden_model::{ExtendDays, InstanceName, SKIP_MARKER_FILE};

    struct FixedClock(i64);

    impl Clock for FixedClock {
        fn now_epoch_seconds(&self) -> i64 {
            self.0
        }
    }

    struct Fixture {
        _root: tempfile::TempDir,
        _state: tempfile::TempDir,
        orchestrator: LifecycleOrchestrator,
        store: Arc<TimefileStore>,
        servers: std::path::PathBuf,
    }

    fn fixture(now: i64) -> Fixture {
        let root = tempfile::tempdir().unwrap();
        let state = tempfile::tempdir().unwrap();

        let servers = root.path().to_path_buf();
        let catalog = Arc::new(InstanceCatalog::new(&servers, []));
        let store = Arc::new(TimefileStore::new(state.path()));
        let reconciler = Arc::new(SkipMarkerReconciler::new(&servers));
        let orchestrator = LifecycleOrchestrator::new(
            catalog,
            store.clone(),
            reconciler,
            Arc::new(FixedClock(now)),
        );

        Fixture {
            _root: root,
            _state: state,
            orchestrator,
            store,
            servers,
        }
    }

    #[tokio::test]
    async fn fresh_extend_creates_timefile_and_marks_subunits() {
        let fx = fixture(1_000_000);
        let data = fx.servers.join("alice").join("data");
        std_fs::create_dir_all(data.join("world")).unwrap();

        let alice = InstanceName::new("alice").unwrap();
        let outcome = fx
            .orchestrator
            .extend(&alice, ExtendDays::new(3).unwrap())
            .await
            .unwrap();

        assert!(outcome.applied);
        assert_eq!(outcome.effective_expiry, 1_000_000 + 259_200);
        assert_eq!(outcome.subunits_marked, 1);
        assert_eq!(outcome.subunits_failed, 0);
        assert_eq!(
            fx.store.read(&alice).await.unwrap(),
            Some(1_000_000 + 259_200)
        );
        assert!(data.join("world").join(SKIP_MARKER_FILE).exists());
    }

    #[tokio::test]
    async fn unknown_instance_is_rejected_before_any_write() {
        let fx = fixture(1_000_000);

        let ghost = InstanceName::new("ghost").unwrap();
        let result = fx
            .orchestrator
            .extend(&ghost, ExtendDays::new(1).unwrap())
            .await;

        assert!(matches!(result, Err(CoreError::UnknownInstance(_))));
        assert_eq!(fx.store.read(&ghost).await.unwrap(), None);
    }

    #[tokio::test]
    async fn markers_are_reconciled_even_when_expiry_does_not_advance() {
        let fx = fixture(100);
        let data = fx.servers.join("carol").join("data");
        std_fs::create_dir_all(data.join("p")).unwrap();

        let carol = InstanceName::new("carol").unwrap();
        // Seed a far-future expiry so the coming update is refused.
        fx.store.update(&carol, 10_000_000).await.unwrap();

        std_fs::create_dir_all(data.join("q")).unwrap();
        let outcome = fx
            .orchestrator
            .extend(&carol, ExtendDays::new(1).unwrap())
            .await
            .unwrap();

        assert!(!outcome.applied);
        assert_eq!(outcome.effective_expiry, 10_000_000);
        assert_eq!(outcome.subunits_marked, 2);
        assert!(data.join("q").join(SKIP_MARKER_FILE).exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn partial_marking_is_reported_in_the_outcome() {
        let fx = fixture(1_000_000);
        let data = fx.servers.join("alice").join("data");
        std_fs::create_dir_all(data.join("world")).unwrap();
        std::os::unix::fs::symlink(data.join("missing"), data.join("broken")).unwrap();

        let alice = InstanceName::new("alice").unwrap();
        let outcome = fx
            .orchestrator
            .extend(&alice, ExtendDays::new(1).unwrap())
            .await
            .unwrap();

        // The expiry update stands even though one sub-unit failed.
        assert!(outcome.applied);
        assert_eq!(outcome.subunits_marked, 2);
        assert_eq!(outcome.subunits_failed, 1);
        assert!(data.join("world").join(SKIP_MARKER_FILE).exists());
    }

    #[tokio::test]
    async fn instance_without_data_dir_extends_with_zero_marked() {
        let fx = fixture(50_000);
        std_fs::create_dir(fx.servers.join("bob")).unwrap();

        let bob = InstanceName::new("bob").unwrap();
        let outcome = fx
            .orchestrator
            .extend(&bob, ExtendDays::new(2).unwrap())
            .await
            .unwrap();

        assert!(outcome.applied);
        assert_eq!(outcome.subunits_marked, 0);
        assert_eq!(fx.store.read(&bob).await.unwrap(), Some(50_000 + 172_800));
    }
}
