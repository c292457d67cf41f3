use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use warden_core::{InstanceCatalog, LifecycleOrchestrator, MetricsHandle};
use warden_exec::{ComposeLauncher, LaunchAction};
use warden_model::{ExtendDays, ExtendOutcome, InstanceName};

use crate::error::ApiError;
use crate::handler::ApiHandler;

/// Adapter that bridges the lifecycle controller to [`ApiHandler`].
///
/// This is the single choke point for requests, so it also owns the metrics
/// handle and records one counter per request outcome.
pub struct ControllerAdapter {
    catalog: Arc<InstanceCatalog>,
    orchestrator: Arc<LifecycleOrchestrator>,
    launcher: Arc<ComposeLauncher>,
    metrics: MetricsHandle,
}

impl ControllerAdapter {
    /// Create a new adapter wrapping the given components.
    pub fn new(
        catalog: Arc<InstanceCatalog>,
        orchestrator: Arc<LifecycleOrchestrator>,
        launcher: Arc<ComposeLauncher>,
        metrics: MetricsHandle,
    ) -> Self {
        Self {
            catalog,
            orchestrator,
            launcher,
            metrics,
        }
    }

    fn fail(&self, err: ApiError) -> ApiError {
        self.metrics.record_failure(err.kind());
        err
    }

    fn launch(&self, server: &str, action: LaunchAction) -> Result<(), ApiError> {
        let name = InstanceName::new(server).map_err(|e| self.fail(e.into()))?;
        self.launcher
            .dispatch(&name, action)
            .map_err(|e| self.fail(e.into()))?;
        self.metrics.record_launch(action.as_label());
        Ok(())
    }
}

#[async_trait]
impl ApiHandler for ControllerAdapter {
    async fn list_servers(&self) -> Result<Vec<String>, ApiError> {
        match self.catalog.list().await {
            Ok(names) => {
                self.metrics.record_listing();
                Ok(names)
            }
            Err(e) => {
                warn!(error = %e, "catalog listing failed");
                Err(self.fail(e.into()))
            }
        }
    }

    async fn extend_time(&self, server: &str, days: i64) -> Result<ExtendOutcome, ApiError> {
        let name = InstanceName::new(server).map_err(|e| self.fail(e.into()))?;
        let days = ExtendDays::new(days).map_err(|e| self.fail(e.into()))?;

        match self.orchestrator.extend(&name, days).await {
            Ok(outcome) => {
                self.metrics.record_extension(outcome.applied);
                Ok(outcome)
            }
            Err(e) => {
                warn!(instance = %name, error = %e, "extend-expiry failed");
                Err(self.fail(e.into()))
            }
        }
    }

    async fn start_server(&self, server: &str) -> Result<(), ApiError> {
        self.launch(server, LaunchAction::Start)
    }

    async fn stop_server(&self, server: &str) -> Result<(), ApiError> {
        self.launch(server, LaunchAction::Stop)
    }
}
