use async_trait::async_trait;
use serde_json::Value;

use crate::{error::ApiError, input::InferInput};

/// Inference entry point behind `POST /infer/{model}`.
///
/// One implementation per inference mode; the router only sees this trait.
#[async_trait]
pub trait InferenceHandler: Send + Sync + 'static {
    /// Mode name for logs (`dispatch`, `proxy`).
    fn mode(&self) -> &'static str;

    /// Handle one request and return the JSON body of a 200 response.
    async fn infer(&self, model: &str, input: InferInput) -> Result<Value, ApiError>;
}
