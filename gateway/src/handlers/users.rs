//! User management proxy handlers
//!
//! `/users/me` unwraps the backend envelope and returns the bare profile,
//! which is what the navigation shell binds to. The `/users/{id}` family is
//! the only one with an explicit upstream timeout: the admin screens behind
//! it must fail fast instead of hanging on a slow backend.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use shared::ApiEnvelope;

use crate::error::{AppError, AppResult};
use crate::middleware::SessionToken;
use crate::AppState;

/// GET /api/users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
) -> AppResult<Json<Value>> {
    let client = state.require_upstream()?;
    let reply = client
        .get("/me", token.as_str(), &[], "fetching the current user")
        .await?;

    if !reply.is_success() {
        return Err(AppError::Upstream {
            status: reply.status,
            message: "Failed to fetch user".to_string(),
            errors: None,
        });
    }

    let user = serde_json::from_value::<ApiEnvelope<Value>>(reply.body)
        .map(ApiEnvelope::into_inner)
        .unwrap_or(Value::Null);

    Ok(Json(user))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let client = state.require_upstream()?;
    let reply = client
        .get("/users", token.as_str(), &[], "fetching users")
        .await?
        .ok_or_upstream("Failed to fetch users")?;

    Ok((StatusCode::OK, Json(reply.body)))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let client = state.require_upstream()?;
    let reply = client
        .post("/users", token.as_str(), &body, "creating user")
        .await?
        .ok_or_upstream("Failed to create user")?;

    Ok((StatusCode::CREATED, Json(reply.body)))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let client = state.require_upstream()?;
    let reply = client
        .get_with_timeout(
            &format!("/users/{id}"),
            token.as_str(),
            upstream_timeout(&state),
            "fetching user",
        )
        .await?
        .ok_or_upstream("Failed to fetch user")?;

    Ok((StatusCode::OK, Json(reply.body)))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let client = state.require_upstream()?;
    let reply = client
        .put_with_timeout(
            &format!("/users/{id}"),
            token.as_str(),
            &body,
            upstream_timeout(&state),
            "updating user",
        )
        .await?
        .ok_or_upstream("Failed to update user")?;

    Ok((reply.status, Json(reply.body)))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let client = state.require_upstream()?;
    let reply = client
        .delete_with_timeout(
            &format!("/users/{id}"),
            token.as_str(),
            upstream_timeout(&state),
            "deleting user",
        )
        .await?
        .ok_or_upstream("Failed to delete user")?;

    let status = reply.status;
    let body = if reply.body.is_null() {
        json!({ "message": "User deleted" })
    } else {
        reply.body
    };

    Ok((status, Json(body)))
}

fn upstream_timeout(state: &AppState) -> Duration {
    Duration::from_secs(state.config.upstream.timeout_seconds)
}
