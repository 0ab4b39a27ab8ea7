mod config;

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use lg_api::{BackendClient, DispatchAdapter, HttpApi, InferenceHandler, ProxyAdapter, cors_layer};
use lg_core::{DispatchGateway, Dispatcher, LaunchContext};
use lg_exec::ecs::EcsRunTaskLauncher;
use lg_observe::init_logger;
use lg_prometheus::PrometheusMetrics;

use crate::config::{GatewayConfig, InferMode};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) configuration
    dotenvy::dotenv().ok();
    let cfg = GatewayConfig::from_env()?;

    // 2) logger
    init_logger(&cfg.logger)?;
    info!(mode = %cfg.mode, bind = %cfg.bind, "configuration loaded");

    // 3) metrics
    let metrics = PrometheusMetrics::new().context("creating metrics registry")?;

    // 4) inference handler
    let handler: Arc<dyn InferenceHandler> = match cfg.mode {
        InferMode::Dispatch => {
            let launcher = EcsRunTaskLauncher::new(cfg.ecs.clone())?;
            info!(
                cluster = %cfg.ecs.cluster,
                task_definition = %cfg.ecs.task_definition,
                container = cfg.ecs.container(),
                ack_timeout_ms = cfg.dispatch.ack_timeout_ms,
                "ecs launcher ready"
            );
            let dispatcher = Dispatcher::new(Arc::new(launcher), cfg.dispatch.clone())
                .with_context(LaunchContext::default().with_metrics(Arc::new(metrics.clone())));
            Arc::new(DispatchAdapter::new(DispatchGateway::new(
                cfg.remote.clone(),
                dispatcher,
            )))
        }
        InferMode::Proxy => {
            let backend = BackendClient::new(
                cfg.backend_url.clone(),
                Duration::from_millis(cfg.backend_timeout_ms),
            )?;
            info!(url = %cfg.backend_url, timeout_ms = cfg.backend_timeout_ms, "proxy backend configured");
            Arc::new(ProxyAdapter::new(backend))
        }
    };

    // 5) router
    let app = HttpApi::new(handler)
        .with_metrics(metrics)
        .router()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&cfg.cors_origins));

    // 6) serve
    let listener = TcpListener::bind(cfg.bind)
        .await
        .with_context(|| format!("binding {}", cfg.bind))?;
    info!(addr = %cfg.bind, origins = ?cfg.cors_origins, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutdown complete");
    Ok(())
}

/// Resolves on SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received ctrl-c, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
