use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use lg_core::CoreError;

/// Error returned by HTTP handlers; renders as a JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("no file received")]
    MissingFile,

    #[error("{0}")]
    Internal(String),

    /// Inference backend answered with a non-success status.
    #[error("Backend returned {status}")]
    BackendStatus { status: u16, details: String },

    /// Inference backend call failed for a reason other than connectivity.
    #[error("{message}")]
    Backend { message: String, kind: &'static str },
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::UnsupportedModel(m) => ApiError::NotFound(format!("Model '{m}' not supported")),
            CoreError::MissingLocator => ApiError::BadRequest("No image path provided".into()),
            CoreError::Encode(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::MissingFile => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "No file received",
                    "message": "Expected 'file' or 'image' in multipart/form-data",
                }),
            ),
            ApiError::Internal(msg) => {
                error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
            ApiError::BackendStatus { status, details } => {
                warn!(status, "inference backend returned an error status");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": self.to_string(), "details": details }),
                )
            }
            ApiError::Backend { message, kind } => {
                warn!(error = %message, kind, "inference backend call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": message, "type": kind }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
