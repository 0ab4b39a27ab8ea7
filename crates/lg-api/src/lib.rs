//! HTTP surface of the gateway: discovery routes, inference, metrics.
//!
//! Inference goes through an [`InferenceHandler`]; [`DispatchAdapter`] launches worker
//! jobs, [`ProxyAdapter`] forwards to a synchronous backend.
pub mod adapter;
pub mod backend;
pub mod discovery;
pub mod error;
pub mod handler;
pub mod http;
pub mod input;

pub use adapter::{DispatchAdapter, ProxyAdapter};
pub use backend::{BackendClient, BackendError};
pub use error::ApiError;
pub use handler::InferenceHandler;
pub use http::{HttpApi, MAX_BODY_BYTES, cors_layer};
pub use input::{InferInput, Upload};
