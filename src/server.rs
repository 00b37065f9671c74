//! Minimal HTTP server for health probes.
//!
//! Kept alongside the issue processing as a `serve` mode; it exposes the
//! hello endpoint plus a health check and nothing else.

use anyhow::{Context, Result};
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Build the HTTP router.
pub fn build_router() -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
}

/// Bind and serve until the process is stopped.
pub async fn serve(port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(addr = %addr, "HTTP server listening");
    axum::serve(listener, build_router())
        .await
        .context("HTTP server exited")?;
    Ok(())
}

async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hello World!" }))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
