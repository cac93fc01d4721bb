//! Unit scan handler
//!
//! Resolves a QR or unit code to its product unit via the backend. The code
//! is validated before any network call; unknown codes, sold units and the
//! like come back as the backend's own 404/409 responses and are relayed.

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use shared::{validation::normalize_scan_code, SessionIdentity};

use crate::error::{AppError, AppResult};
use crate::middleware::SessionToken;
use crate::services::scoping::scope_body;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub code: Option<String>,
}

/// POST /api/scan-qr
pub async fn scan_qr(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Extension(identity): Extension<SessionIdentity>,
    Json(request): Json<ScanRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let code = normalize_scan_code(request.code.as_deref().unwrap_or(""))
        .ok_or_else(|| AppError::Validation("QR code must not be empty".to_string()))?;

    let mut body = json!({ "code": code });
    scope_body(&identity.scope(), &mut body);

    let client = state.require_upstream()?;
    let reply = client
        .post("/scan-qr", token.as_str(), &body, "scanning QR")
        .await?
        .ok_or_upstream("Failed to scan QR")?;

    Ok((StatusCode::OK, Json(reply.body)))
}
