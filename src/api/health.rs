//! Public endpoints: welcome, ping and probes

use axum::{http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::types::Data;

const WELCOME: &str = "Welcome to the Grotto API. Grotto is a private, minimalist \
    feed for sharing cool links with close friends. Create small groups, post \
    interesting finds, and keep it all lightweight, personal, and distraction-free.";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /
pub async fn root() -> Data<&'static str> {
    Data(WELCOME)
}

/// GET /ping
pub async fn ping() -> Data<&'static str> {
    Data("Pong")
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    axum::Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /live - liveness probe, verifies only that the process responds
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}
