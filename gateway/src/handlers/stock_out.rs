//! Stock-out transaction handlers
//!
//! `from-units` is the checkout submission target: a batch of scanned unit
//! ids plus buyer details becomes one sales transaction. The units array is
//! checked here so an empty cart never reaches the backend; everything else
//! is the backend's to validate.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::Value;

use shared::SessionIdentity;

use crate::error::{AppError, AppResult};
use crate::handlers::stock_in::StockListQuery;
use crate::middleware::SessionToken;
use crate::services::scoping::{scope_body, scope_query};
use crate::AppState;

/// GET /api/stock-out
pub async fn list_stock_out(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Extension(identity): Extension<SessionIdentity>,
    Query(query): Query<StockListQuery>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let mut params = query.to_params();
    scope_query(&identity.scope(), &mut params);

    let client = state.require_upstream()?;
    let reply = client
        .get("/stock-out", token.as_str(), &params, "fetching stock-out")
        .await?
        .ok_or_upstream("Failed to fetch stock-out data")?;

    Ok((StatusCode::OK, Json(reply.body)))
}

/// POST /api/stock-out/from-units
///
/// A warehouse-bound caller's transaction lands in their own warehouse no
/// matter what the body says; an admin's choice of warehouse is forwarded.
pub async fn create_stock_out_from_units(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Extension(identity): Extension<SessionIdentity>,
    Json(mut body): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let has_units = body
        .get("units")
        .and_then(Value::as_array)
        .map(|units| !units.is_empty())
        .unwrap_or(false);
    if !has_units {
        return Err(AppError::Validation(
            "Units array must not be empty".to_string(),
        ));
    }

    scope_body(&identity.scope(), &mut body);

    let client = state.require_upstream()?;
    let reply = client
        .post(
            "/stock-out/from-units",
            token.as_str(),
            &body,
            "creating stock-out from units",
        )
        .await?
        .ok_or_upstream("Failed to create stock-out from units")?;

    Ok((StatusCode::CREATED, Json(reply.body)))
}
