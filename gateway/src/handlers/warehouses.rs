//! Warehouse proxy handlers
//!
//! Warehouse records themselves are not scoped: staff need the list to
//! display names, and only admins reach the mutating routes in practice.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::middleware::SessionToken;
use crate::AppState;

/// GET /api/warehouses
pub async fn list_warehouses(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let client = state.require_upstream()?;
    let reply = client
        .get("/warehouses", token.as_str(), &[], "fetching warehouses")
        .await?
        .ok_or_upstream("Failed to fetch warehouses")?;

    Ok((StatusCode::OK, Json(reply.body)))
}

/// POST /api/warehouses
pub async fn create_warehouse(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let client = state.require_upstream()?;
    let reply = client
        .post("/warehouses", token.as_str(), &body, "creating warehouse")
        .await?
        .ok_or_upstream("Failed to create warehouse")?;

    Ok((StatusCode::CREATED, Json(reply.body)))
}

/// GET /api/warehouses/{id}
pub async fn get_warehouse(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let client = state.require_upstream()?;
    let reply = client
        .get(
            &format!("/warehouses/{id}"),
            token.as_str(),
            &[],
            "fetching warehouse",
        )
        .await?
        .ok_or_upstream("Failed to fetch warehouse")?;

    Ok((StatusCode::OK, Json(reply.body)))
}

/// PUT /api/warehouses/{id}
pub async fn update_warehouse(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let client = state.require_upstream()?;
    let reply = client
        .put(
            &format!("/warehouses/{id}"),
            token.as_str(),
            &body,
            "updating warehouse",
        )
        .await?
        .ok_or_upstream("Failed to update warehouse")?;

    Ok((StatusCode::OK, Json(reply.body)))
}

/// DELETE /api/warehouses/{id}
pub async fn delete_warehouse(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let client = state.require_upstream()?;
    let reply = client
        .delete(
            &format!("/warehouses/{id}"),
            token.as_str(),
            "deleting warehouse",
        )
        .await?
        .ok_or_upstream("Failed to delete warehouse")?;

    let message = reply.message().unwrap_or("warehouse deleted").to_string();
    Ok((StatusCode::OK, Json(json!({ "message": message }))))
}
