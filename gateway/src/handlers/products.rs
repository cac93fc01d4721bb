//! Product catalog proxy handlers
//!
//! Products are not warehouse-scoped; the catalog is shared. These routes
//! only require a session and relay the backend's responses.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::middleware::SessionToken;
use crate::AppState;

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let client = state.require_upstream()?;
    let reply = client
        .get("/products", token.as_str(), &[], "fetching products")
        .await?
        .ok_or_upstream("Failed to fetch products")?;

    Ok((StatusCode::OK, Json(reply.body)))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let client = state.require_upstream()?;
    let reply = client
        .post("/products", token.as_str(), &body, "creating product")
        .await?
        .ok_or_upstream("Failed to create product")?;

    Ok((StatusCode::CREATED, Json(reply.body)))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let client = state.require_upstream()?;
    let reply = client
        .get(
            &format!("/products/{id}"),
            token.as_str(),
            &[],
            "fetching product",
        )
        .await?
        .ok_or_upstream("Failed to fetch product")?;

    Ok((StatusCode::OK, Json(reply.body)))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let client = state.require_upstream()?;
    let reply = client
        .put(
            &format!("/products/{id}"),
            token.as_str(),
            &body,
            "updating product",
        )
        .await?
        .ok_or_upstream("Failed to update product")?;

    Ok((StatusCode::OK, Json(reply.body)))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let client = state.require_upstream()?;
    let reply = client
        .delete(
            &format!("/products/{id}"),
            token.as_str(),
            "deleting product",
        )
        .await?
        .ok_or_upstream("Failed to delete product")?;

    let message = reply.message().unwrap_or("Product deleted").to_string();
    Ok((StatusCode::OK, Json(json!({ "message": message }))))
}
