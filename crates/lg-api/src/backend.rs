//! HTTP client for the synchronous inference backend used in proxy mode.
use std::{collections::BTreeMap, time::Duration};

use reqwest::{
    StatusCode,
    multipart::{Form, Part},
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::input::Upload;

#[derive(Debug, Error)]
pub enum BackendError {
    /// Connection could not be established.
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    #[error("backend request timed out")]
    Timeout,

    #[error("backend returned {status}")]
    Status { status: u16, body: String },

    #[error("backend response is not valid JSON: {0}")]
    Decode(String),

    #[error("backend request failed: {0}")]
    Request(String),
}

impl BackendError {
    /// Value of the `type` field in the error body.
    pub fn kind(&self) -> &'static str {
        match self {
            BackendError::Unreachable(_) => "ConnectionError",
            BackendError::Timeout => "Timeout",
            BackendError::Status { .. } => "HTTPError",
            BackendError::Decode(_) => "DecodeError",
            BackendError::Request(_) => "RequestError",
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            BackendError::Unreachable(e.to_string())
        } else if e.is_timeout() {
            BackendError::Timeout
        } else if e.is_decode() {
            BackendError::Decode(e.to_string())
        } else {
            BackendError::Request(e.to_string())
        }
    }
}

pub struct BackendClient {
    client: reqwest::Client,
    url: String,
}

impl BackendClient {
    /// `url` is the full predict endpoint, e.g. `http://localhost:8001/predict`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Forward one upload; params are sent as a compact JSON object in the `params` field.
    #[instrument(level = "debug", skip(self, upload, params), fields(url = %self.url, bytes = upload.bytes.len()))]
    pub async fn predict(
        &self,
        model: &str,
        upload: &Upload,
        params: &BTreeMap<String, String>,
    ) -> Result<Value, BackendError> {
        let mut part = Part::bytes(upload.bytes.to_vec()).file_name(upload.file_name.clone());
        if let Some(ct) = &upload.content_type {
            part = part.mime_str(ct)?;
        }
        let params = serde_json::to_string(params).map_err(|e| BackendError::Request(e.to_string()))?;
        let form = Form::new()
            .part("file", part)
            .text("model", model.to_string())
            .text("params", params);

        let response = self.client.post(&self.url).multipart(form).send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "backend answered");

        // Only a plain 200 carries an inference result.
        if status != StatusCode::OK {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(status = status.as_u16(), error = %e, "backend error body unreadable");
                    format!("unreadable response body: {e}")
                }
            };
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<Value>().await?)
    }
}
