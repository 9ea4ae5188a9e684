pub mod control_plane;
pub mod lambda_handler;
pub mod relay_error;
pub mod route_relay;
pub mod route_update;
mod submit_routes;

use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use control_plane::S3ControlPlane;
use route_relay::RouteRelay;

/// Builds the process-wide relay backed by S3 Control.
pub async fn build(config: &Config) -> RouteRelay {
    let control_plane = S3ControlPlane::from_config(config).await;
    info!(
        "S3 Control client ready for region {}",
        config.control_plane_region
    );
    RouteRelay::new(Arc::new(control_plane))
}

pub fn router(relay: Arc<RouteRelay>) -> Router {
    Router::new()
        .route("/routes", post(submit_routes::handle))
        .route("/health", get(|| async { "ok" }))
        .layer(Extension(relay))
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(config: &Config, relay: Arc<RouteRelay>) -> anyhow::Result<()> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", &config.address, &config.port)).await?;

    info!("running mrap-relay on {}:{}", &config.address, &config.port);

    axum::serve(listener, router(relay))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub async fn run_lambda(relay: Arc<RouteRelay>) -> anyhow::Result<()> {
    info!("running mrap-relay under the Lambda runtime");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let relay = Arc::clone(&relay);
        async move { lambda_handler::handle(&relay, event).await }
    }))
    .await
    .map_err(|e| anyhow!(e))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
