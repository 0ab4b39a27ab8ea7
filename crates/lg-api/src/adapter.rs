//! [`InferenceHandler`] implementations for the two inference modes.
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{error, info, warn};

use lg_core::{CoreError, DispatchGateway};
use lg_model::{FallbackResult, ModelId};

use crate::{
    backend::{BackendClient, BackendError},
    error::ApiError,
    handler::InferenceHandler,
    input::InferInput,
};

/// Dispatch mode: acknowledge and launch a worker job in the background.
pub struct DispatchAdapter {
    gateway: DispatchGateway,
}

impl DispatchAdapter {
    pub fn new(gateway: DispatchGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl InferenceHandler for DispatchAdapter {
    fn mode(&self) -> &'static str {
        "dispatch"
    }

    async fn infer(&self, model: &str, input: InferInput) -> Result<Value, ApiError> {
        self.gateway
            .dispatch(model, input.image.as_deref())
            .map(|ack| json!({ "message": ack.message() }))
            .map_err(|e| dispatch_error(model, e))
    }
}

/// Encoding failures hide their cause from the viewer.
fn dispatch_error(model: &str, e: CoreError) -> ApiError {
    match e {
        CoreError::Encode(reason) => {
            error!(model, %reason, "descriptor encoding failed");
            ApiError::Internal(format!("Failed to run {model}"))
        }
        e => e.into(),
    }
}

/// Proxy mode: forward the upload to a synchronous backend and relay its answer.
pub struct ProxyAdapter {
    backend: BackendClient,
}

impl ProxyAdapter {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl InferenceHandler for ProxyAdapter {
    fn mode(&self) -> &'static str {
        "proxy"
    }

    async fn infer(&self, model: &str, input: InferInput) -> Result<Value, ApiError> {
        let id: ModelId = model
            .parse()
            .map_err(|_| ApiError::from(CoreError::UnsupportedModel(model.to_string())))?;
        let upload = input.file.ok_or(ApiError::MissingFile)?;

        match self.backend.predict(model, &upload, &input.params).await {
            Ok(body) => {
                info!(%id, "backend inference succeeded");
                Ok(body)
            }
            Err(BackendError::Unreachable(reason)) => {
                warn!(%id, url = self.backend.url(), %reason, "backend unavailable; returning fallback result");
                let fallback = FallbackResult::synthesize(id, &input.params);
                serde_json::to_value(fallback).map_err(|e| ApiError::Internal(e.to_string()))
            }
            Err(BackendError::Status { status, body }) => Err(ApiError::BackendStatus {
                status,
                details: body,
            }),
            Err(e) => Err(ApiError::Backend {
                kind: e.kind(),
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use http_body_util::BodyExt;

    use super::*;

    #[tokio::test]
    async fn encode_failure_is_500_with_generic_message() {
        let response = dispatch_error("ef_analysis", CoreError::Encode("key must be a string".into()))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"error": "Failed to run ef_analysis"}));
    }

    #[test]
    fn other_core_errors_keep_their_mapping() {
        let e = dispatch_error("x", CoreError::UnsupportedModel("x".into()));
        assert_eq!(e.into_response().status(), StatusCode::NOT_FOUND);

        let e = dispatch_error("ef_analysis", CoreError::MissingLocator);
        assert_eq!(e.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
