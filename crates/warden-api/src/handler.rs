use async_trait::async_trait;

use warden_model::ExtendOutcome;

use crate::error::ApiError;

/// Lifecycle controller API handler.
///
/// This trait abstracts the backend implementation, allowing users to:
/// - Use the provided [`crate::ControllerAdapter`]
/// - Implement custom handlers with additional logic (auth, rate limiting, etc.)
///
/// Handlers receive raw wire strings; turning them into validated domain
/// types is the implementation's first step.
#[async_trait]
pub trait ApiHandler: Send + Sync + 'static {
    /// List the names of all managed instances.
    async fn list_servers(&self) -> Result<Vec<String>, ApiError>;

    /// Extend the keep-alive expiry of `server` by `days`.
    async fn extend_time(&self, server: &str, days: i64) -> Result<ExtendOutcome, ApiError>;

    /// Dispatch a start of `server`'s deployment (fire-and-forget).
    async fn start_server(&self, server: &str) -> Result<(), ApiError>;

    /// Dispatch a stop of `server`'s deployment (fire-and-forget).
    async fn stop_server(&self, server: &str) -> Result<(), ApiError>;
}
