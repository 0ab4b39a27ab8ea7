#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use lg_api::{BackendClient, DispatchAdapter, HttpApi, ProxyAdapter};
use lg_core::{
    Acknowledgement, DispatchConfig, DispatchGateway, Dispatcher, LaunchContext, LaunchError,
    Launcher, SubmissionRecord,
};
use lg_model::RemoteHost;

pub const BOUNDARY: &str = "labelgate-test-boundary";

/// Launcher that sleeps before accepting, recording every submission.
pub struct SlowLauncher {
    delay: Duration,
    calls: AtomicUsize,
    seen: Mutex<Vec<SubmissionRecord>>,
}

impl SlowLauncher {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<SubmissionRecord> {
        self.seen.lock().unwrap().clone()
    }

    /// Wait until `n` submissions have started, up to one second.
    pub async fn wait_for_calls(&self, n: usize) -> bool {
        for _ in 0..100 {
            if self.calls() >= n {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }
}

#[async_trait]
impl Launcher for SlowLauncher {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn submit(
        &self,
        record: &SubmissionRecord,
        _ctx: &LaunchContext,
    ) -> Result<Acknowledgement, LaunchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(record.clone());
        tokio::time::sleep(self.delay).await;
        Ok(Acknowledgement::default())
    }
}

pub fn dispatch_app(launcher: Arc<SlowLauncher>) -> Router {
    let dispatcher = Dispatcher::new(launcher, DispatchConfig::default());
    let gateway = DispatchGateway::new(RemoteHost::default(), dispatcher);
    HttpApi::new(Arc::new(DispatchAdapter::new(gateway))).router()
}

pub fn proxy_app(backend_url: &str) -> Router {
    let client = BackendClient::new(backend_url, Duration::from_secs(5)).unwrap();
    HttpApi::new(Arc::new(ProxyAdapter::new(client))).router()
}

pub async fn send(app: Router, req: Request<Body>) -> Response<Body> {
    app.oneshot(req).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// One multipart part: name, optional file name, content.
pub type PartSpec<'a> = (&'a str, Option<&'a str>, &'a [u8]);

pub fn multipart_body(parts: &[PartSpec<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(f) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: Router, uri: &str, parts: &[PartSpec<'_>]) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap(),
    )
    .await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
