//! Product unit proxy handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::Value;

use shared::SessionIdentity;

use crate::error::AppResult;
use crate::middleware::SessionToken;
use crate::services::scoping::scope_query;
use crate::AppState;

/// GET /api/product-units
///
/// Filters (status, product, pagination) pass through untouched; only the
/// warehouse filter is subject to the caller's scope.
pub async fn list_product_units(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Extension(identity): Extension<SessionIdentity>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let mut params = params;
    scope_query(&identity.scope(), &mut params);

    let client = state.require_upstream()?;
    let reply = client
        .get(
            "/product-units",
            token.as_str(),
            &params,
            "fetching product units",
        )
        .await?
        .ok_or_upstream("Failed to fetch product units")?;

    Ok((StatusCode::OK, Json(reply.body)))
}
