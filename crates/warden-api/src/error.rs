use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use warden_core::CoreError;
use warden_exec::ExecError;
use warden_model::ModelError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller input failed validation; no filesystem mutation happened.
    #[error("{0}")]
    InvalidRequest(String),

    /// Catalog root could not be read.
    ///
    /// The display text is the exact wire contract of `GET /list`.
    #[error("Error listing servers")]
    Listing,

    /// Anything else: persistence, reconciliation, spawn failures.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Stable label used for the failure counter.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::Listing => "listing",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Listing { .. } => ApiError::Listing,
            CoreError::UnknownInstance(_) | CoreError::Invalid(_) => {
                ApiError::InvalidRequest(e.to_string())
            }
            CoreError::Persistence { .. } | CoreError::Reconciliation { .. } => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<ModelError> for ApiError {
    fn from(e: ModelError) -> Self {
        ApiError::InvalidRequest(e.to_string())
    }
}

impl From<ExecError> for ApiError {
    fn from(e: ExecError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Listing | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
