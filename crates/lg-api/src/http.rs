use std::{sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, FromRequest, Path, Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::Value;
use tower_http::cors::{AllowHeaders, AllowOrigin, Any, CorsLayer};
use tracing::{error, info, warn};

use lg_core::CoreError;
use lg_model::ModelId;
use lg_prometheus::PrometheusMetrics;

use crate::{discovery, error::ApiError, handler::InferenceHandler, input::InferInput};

/// Largest accepted request body; uploads are whole image volumes.
pub const MAX_BODY_BYTES: usize = 512 * 1024 * 1024;

#[derive(Clone)]
struct ApiState {
    handler: Arc<dyn InferenceHandler>,
    metrics: Option<PrometheusMetrics>,
}

/// HTTP API service builder.
pub struct HttpApi {
    handler: Arc<dyn InferenceHandler>,
    metrics: Option<PrometheusMetrics>,
}

impl HttpApi {
    pub fn new(handler: Arc<dyn InferenceHandler>) -> Self {
        Self {
            handler,
            metrics: None,
        }
    }

    /// Serve `/metrics` from this backend.
    pub fn with_metrics(mut self, metrics: PrometheusMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the router. Trailing-slash variants are registered explicitly.
    pub fn router(self) -> Router {
        let state = ApiState {
            handler: self.handler,
            metrics: self.metrics,
        };
        Router::new()
            .route("/", get(discovery::health))
            .route("/health", get(discovery::health))
            .route("/info", get(discovery::info))
            .route("/info/", get(discovery::info))
            .route("/info/models", get(discovery::info_models))
            .route("/info/model/{name}", get(discovery::info_model))
            .route("/datastore/image/info/", get(discovery::image_info))
            .route("/datastore/image/info", get(discovery::image_info))
            .route("/session/", post(discovery::session))
            .route("/infer/{model}", post(infer))
            .route("/infer/{model}/", post(infer))
            .route("/activelearning/{model}", post(discovery::active_learning))
            .route("/logs", get(discovery::logs))
            .route("/logs/", get(discovery::logs))
            .route("/metrics", get(metrics))
            .layer(middleware::from_fn(answer_options))
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
            .with_state(state)
    }
}

/// POST /infer/{model}
///
/// The model id is checked before the body is read, so an unknown model is a 404
/// whatever the payload looks like.
async fn infer(
    State(state): State<ApiState>,
    Path(model): Path<String>,
    req: Request,
) -> Result<Json<Value>, ApiError> {
    if model.parse::<ModelId>().is_err() {
        warn!(%model, "inference requested for unknown model");
        return Err(CoreError::UnsupportedModel(model).into());
    }
    let input = <InferInput as FromRequest<()>>::from_request(req, &()).await?;
    info!(
        mode = state.handler.mode(),
        %model,
        image = ?input.image,
        "inference requested"
    );
    state.handler.infer(&model, input).await.map(Json)
}

/// Any `OPTIONS` request that reaches the router is answered with an empty 200.
async fn answer_options(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(req).await
}

/// GET /metrics
async fn metrics(State(state): State<ApiState>) -> Response {
    let Some(metrics) = state.metrics else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match metrics.encode_text() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// CORS policy for the viewer origins. A `*` entry allows any origin without credentials.
///
/// Requested headers are mirrored back, so viewer preflights never fail on a header name.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .max_age(Duration::from_secs(3600));

    if origins.iter().any(|o| o.trim() == "*") {
        return base.allow_origin(Any);
    }
    let list: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o.trim()).ok())
        .collect();
    base.allow_origin(AllowOrigin::list(list))
        .allow_credentials(true)
}
