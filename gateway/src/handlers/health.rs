//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub upstream: String,
}

/// Health check endpoint handler
///
/// Reports whether a backend base URL is configured; it does not probe the
/// backend itself, so a healthy gateway stays healthy while the backend is
/// down.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let upstream = if state.upstream.is_some() {
        "configured".to_string()
    } else {
        "unconfigured".to_string()
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        upstream,
    })
}
