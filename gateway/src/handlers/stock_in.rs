//! Stock-in transaction handlers
//!
//! Inbound stock lists and writes are warehouse-scoped. The detail route
//! checks the fetched record's warehouse as well, so a bound caller cannot
//! read another warehouse's transaction by guessing ids. The delivery note
//! route renders that same detail as a printable PDF.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;

use shared::{ApiEnvelope, SessionIdentity};

use crate::error::{AppError, AppResult};
use crate::middleware::SessionToken;
use crate::services::documents::{render_delivery_note, DeliveryNote};
use crate::services::scoping::{scope_body, scope_query};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StockListQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub warehouse_id: Option<String>,
}

impl StockListQuery {
    /// Pagination params with defaults, plus the requested warehouse filter.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            (
                "page".to_string(),
                self.page.clone().unwrap_or_else(|| "1".to_string()),
            ),
            (
                "per_page".to_string(),
                self.per_page.clone().unwrap_or_else(|| "20".to_string()),
            ),
        ];
        if let Some(warehouse_id) = &self.warehouse_id {
            params.push(("warehouse_id".to_string(), warehouse_id.clone()));
        }
        params
    }
}

/// GET /api/stock-in
pub async fn list_stock_in(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Extension(identity): Extension<SessionIdentity>,
    Query(query): Query<StockListQuery>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let mut params = query.to_params();
    scope_query(&identity.scope(), &mut params);

    let client = state.require_upstream()?;
    let reply = client
        .get("/stock-in", token.as_str(), &params, "fetching stock-in")
        .await?
        .ok_or_upstream("Failed to fetch stock-in data")?;

    Ok((StatusCode::OK, Json(reply.body)))
}

/// POST /api/stock-in
pub async fn create_stock_in(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Extension(identity): Extension<SessionIdentity>,
    Json(mut body): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    scope_body(&identity.scope(), &mut body);

    let client = state.require_upstream()?;
    let reply = client
        .post("/stock-in", token.as_str(), &body, "creating stock-in")
        .await?
        .ok_or_upstream("Failed to create stock-in")?;

    Ok((StatusCode::CREATED, Json(reply.body)))
}

/// GET /api/stock-in/{id}
pub async fn get_stock_in(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Extension(identity): Extension<SessionIdentity>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let record = fetch_scoped_stock_in(&state, &token, &identity, id).await?;
    Ok((StatusCode::OK, Json(record)))
}

/// GET /api/stock-in/{id}/delivery-note
pub async fn print_delivery_note(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Extension(identity): Extension<SessionIdentity>,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let record = fetch_scoped_stock_in(&state, &token, &identity, id).await?;

    let note = DeliveryNote::from_stock_in(&record);
    let pdf_bytes = render_delivery_note(&note)?;

    let disposition = format!("attachment; filename=\"{}\"", note.file_name());
    let headers = [
        (header::CONTENT_TYPE, "application/pdf"),
        (header::CONTENT_DISPOSITION, disposition.as_str()),
    ];

    Ok((headers, pdf_bytes).into_response())
}

/// Fetches one stock-in record and enforces the caller's warehouse scope.
///
/// A record from another warehouse is reported as not found rather than
/// forbidden, so ids outside the caller's scope stay unguessable.
async fn fetch_scoped_stock_in(
    state: &AppState,
    token: &SessionToken,
    identity: &SessionIdentity,
    id: i64,
) -> AppResult<Value> {
    let client = state.require_upstream()?;
    let reply = client
        .get(
            &format!("/stock-in/{id}"),
            token.as_str(),
            &[],
            "fetching stock-in",
        )
        .await?
        .ok_or_upstream("Failed to fetch stock-in data")?;

    let record = serde_json::from_value::<ApiEnvelope<Value>>(reply.body)
        .map(ApiEnvelope::into_inner)
        .unwrap_or(Value::Null);

    if let Some(own_warehouse) = identity.scope().bound_warehouse() {
        let record_warehouse = record.get("warehouse_id").and_then(Value::as_i64);
        if record_warehouse.is_some() && record_warehouse != Some(own_warehouse) {
            return Err(AppError::Upstream {
                status: StatusCode::NOT_FOUND,
                message: "Stock-in not found".to_string(),
                errors: None,
            });
        }
    }

    Ok(record)
}
