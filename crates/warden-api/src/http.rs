use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use warden_model::{ExtendRequest, LaunchRequest};

use crate::{error::ApiError, handler::ApiHandler};

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
}

impl<H> HttpApi<H>
where
    H: ApiHandler,
{
    /// Create new HTTP API with the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - GET /list - List managed instances
    /// - POST /extendtime - Extend an instance's keep-alive expiry
    /// - POST /start - Dispatch a deployment start
    /// - POST /stop - Dispatch a deployment stop
    pub fn router(self) -> Router {
        Router::new()
            .route("/list", get(list_servers::<H>))
            .route("/extendtime", post(extend_time::<H>))
            .route("/start", post(start_server::<H>))
            .route("/stop", post(stop_server::<H>))
            .with_state(self.handler)
    }
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct ListResponse {
    message: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct MessageResponse {
    message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /list
async fn list_servers<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let servers = handler.list_servers().await?;

    Ok(Json(ListResponse { message: servers }))
}

/// POST /extendtime
async fn extend_time<H>(
    State(handler): State<Arc<H>>,
    Json(req): Json<ExtendRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let outcome = handler.extend_time(&req.server, req.days).await?;

    Ok(Json(MessageResponse {
        message: format!(
            "Extended time for {} another {} days",
            outcome.instance, outcome.days
        ),
    }))
}

/// POST /start
async fn start_server<H>(
    State(handler): State<Arc<H>>,
    Json(req): Json<LaunchRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    handler.start_server(&req.server).await?;

    Ok(Json(MessageResponse {
        message: format!("Started {}", req.server),
    }))
}

/// POST /stop
async fn stop_server<H>(
    State(handler): State<Arc<H>>,
    Json(req): Json<LaunchRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    handler.stop_server(&req.server).await?;

    Ok(Json(MessageResponse {
        message: format!("Stopped {}", req.server),
    }))
}

#[cfg(test)]
mod tests {
    use super::{ListResponse, MessageResponse};

    #[test]
    fn list_response_matches_wire_shape() {
        let resp = ListResponse {
            message: vec!["alice".into(), "bob".into()],
        };
        let json = serde_json::to_string(&resp).unwrap();

        assert_eq!(json, r#"{"message":["alice","bob"]}"#);
    }

    #[test]
    fn extend_message_matches_wire_shape() {
        let resp = MessageResponse {
            message: format!("Extended time for {} another {} days", "alice", 3),
        };
        let json = serde_json::to_string(&resp).unwrap();

        assert_eq!(
            json,
            r#"{"message":"Extended time for alice another 3 days"}"#
        );
    }
}
