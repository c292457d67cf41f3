use std::sync::Arc;

use anyhow::Context;
use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};
use tokio::net::TcpListener;
use tracing::info;

use warden_api::{ControllerAdapter, HttpApi};
use warden_core::{
    ClockHandle, InstanceCatalog, LifecycleOrchestrator, MetricsHandle, SkipMarkerReconciler,
    SystemClock, TimefileStore,
};
use warden_exec::ComposeLauncher;
use warden_observe::{LoggerConfig, LoggerLevel, init_logger};
use warden_prometheus::{Encoder, PrometheusMetrics, TextEncoder};

mod config;
use config::AgentConfig;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let config = AgentConfig::from_env()?;

    // 1) logger
    let logger = LoggerConfig {
        level: LoggerLevel::new(&config.log_level)?,
        format: config.log_format.parse()?,
        ..Default::default()
    };
    init_logger(&logger)?;
    info!("logger initialized");

    // 2) fatal startup check
    config.ensure_catalog_root()?;

    // 3) lifecycle components
    let catalog = Arc::new(InstanceCatalog::new(
        &config.servers_dir,
        config.exclusions.clone(),
    ));
    let store = Arc::new(TimefileStore::new(&config.state_dir));
    let reconciler = Arc::new(SkipMarkerReconciler::new(&config.servers_dir));
    let clock: ClockHandle = Arc::new(SystemClock);
    let orchestrator = Arc::new(LifecycleOrchestrator::new(
        catalog.clone(),
        store,
        reconciler,
        clock,
    ));
    let launcher = Arc::new(ComposeLauncher::new(&config.servers_dir));

    // 4) metrics + API handler
    let metrics = Arc::new(PrometheusMetrics::new()?);
    let metrics_handle: MetricsHandle = metrics.clone();
    let handler = Arc::new(ControllerAdapter::new(
        catalog,
        orchestrator,
        launcher,
        metrics_handle,
    ));

    // 5) serve
    let app = HttpApi::new(handler)
        .router()
        .merge(metrics_router(metrics));
    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("cannot bind {}", config.listen_addr))?;
    info!(
        addr = %config.listen_addr,
        servers_dir = %config.servers_dir.display(),
        state_dir = %config.state_dir.display(),
        "warden-agentd listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}

fn metrics_router(metrics: Arc<PrometheusMetrics>) -> Router {
    Router::new().route(
        "/metrics",
        get(move || {
            let metrics = metrics.clone();
            async move { render_metrics(&metrics) }
        }),
    )
}

fn render_metrics(metrics: &PrometheusMetrics) -> axum::response::Response {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    match encoder.encode(&metrics.gather(), &mut buffer) {
        Ok(()) => (
            [(
                axum::http::header::CONTENT_TYPE,
                encoder.format_type().to_string(),
            )],
            buffer,
        )
            .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}
