//! Report proxy handlers
//!
//! All four reports share one shape: pagination defaults, warehouse
//! scoping, passthrough of every other filter. Adding `format=csv` to any
//! of them downloads the report rows as CSV instead of relaying JSON; the
//! `format` parameter itself is never forwarded upstream.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;

use shared::SessionIdentity;

use crate::error::AppResult;
use crate::middleware::SessionToken;
use crate::services::export::rows_to_csv;
use crate::services::scoping::scope_query;
use crate::AppState;

/// GET /api/reports/sales
pub async fn get_sales_report(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Extension(identity): Extension<SessionIdentity>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    relay_report(
        &state,
        &token,
        &identity,
        params,
        ReportRoute {
            path: "/reports/sales",
            context: "fetching sales report",
            fallback: "Failed to fetch sales report",
            csv_name: "sales-report.csv",
        },
    )
    .await
}

/// GET /api/reports/stock-in
pub async fn get_stock_in_report(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Extension(identity): Extension<SessionIdentity>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    relay_report(
        &state,
        &token,
        &identity,
        params,
        ReportRoute {
            path: "/reports/stock-in",
            context: "fetching stock-in report",
            fallback: "Failed to fetch stock-in report",
            csv_name: "stock-in-report.csv",
        },
    )
    .await
}

/// GET /api/reports/stock-out
pub async fn get_stock_out_report(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Extension(identity): Extension<SessionIdentity>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    relay_report(
        &state,
        &token,
        &identity,
        params,
        ReportRoute {
            path: "/reports/stock-out",
            context: "fetching stock-out report",
            fallback: "Failed to fetch stock-out report",
            csv_name: "stock-out-report.csv",
        },
    )
    .await
}

/// GET /api/reports/stock-balance
pub async fn get_stock_balance_report(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Extension(identity): Extension<SessionIdentity>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    relay_report(
        &state,
        &token,
        &identity,
        params,
        ReportRoute {
            path: "/reports/stock-balance",
            context: "fetching stock-balance report",
            fallback: "Failed to fetch stock-balance report",
            csv_name: "stock-balance-report.csv",
        },
    )
    .await
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub warehouse_id: Option<String>,
    pub format: Option<String>,
}

/// GET /api/reports/stock-in/export-units
///
/// Per-unit export rows for a date range. Unlike the paginated reports this
/// forwards only the date range and warehouse filter.
pub async fn export_stock_in_units(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Extension(identity): Extension<SessionIdentity>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    relay_unit_export(
        &state,
        &token,
        &identity,
        query,
        ExportRoute {
            path: "/reports/stock-in/export-units",
            context: "fetching stock-in report",
            fallback: "Failed to fetch stock-in report",
            stem: "stock-in-units",
        },
    )
    .await
}

/// GET /api/reports/stock-out/export-units
pub async fn export_stock_out_units(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Extension(identity): Extension<SessionIdentity>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    relay_unit_export(
        &state,
        &token,
        &identity,
        query,
        ExportRoute {
            path: "/reports/stock-out/export-units",
            context: "fetching stock-out report",
            fallback: "Failed to fetch stock-out report",
            stem: "stock-out-units",
        },
    )
    .await
}

struct ExportRoute {
    path: &'static str,
    context: &'static str,
    fallback: &'static str,
    stem: &'static str,
}

async fn relay_unit_export(
    state: &AppState,
    token: &SessionToken,
    identity: &SessionIdentity,
    query: ExportQuery,
    route: ExportRoute,
) -> AppResult<Response> {
    let mut params = Vec::new();
    if let Some(date_from) = &query.date_from {
        params.push(("date_from".to_string(), date_from.clone()));
    }
    if let Some(date_to) = &query.date_to {
        params.push(("date_to".to_string(), date_to.clone()));
    }
    if let Some(warehouse_id) = &query.warehouse_id {
        params.push(("warehouse_id".to_string(), warehouse_id.clone()));
    }
    scope_query(&identity.scope(), &mut params);

    let client = state.require_upstream()?;
    let reply = client
        .get(route.path, token.as_str(), &params, route.context)
        .await?
        .ok_or_upstream(route.fallback)?;

    if query.format.as_deref() == Some("csv") {
        let csv = rows_to_csv(report_rows(&reply.body))?;
        let file_name = export_file_name(
            route.stem,
            query.date_from.as_deref(),
            query.date_to.as_deref(),
        );
        return Ok(csv_response(csv, &file_name));
    }

    Ok((StatusCode::OK, Json(reply.body)).into_response())
}

struct ReportRoute {
    path: &'static str,
    context: &'static str,
    fallback: &'static str,
    csv_name: &'static str,
}

async fn relay_report(
    state: &AppState,
    token: &SessionToken,
    identity: &SessionIdentity,
    mut params: Vec<(String, String)>,
    route: ReportRoute,
) -> AppResult<Response> {
    let wants_csv = take_csv_format(&mut params);
    ensure_pagination_defaults(&mut params);
    scope_query(&identity.scope(), &mut params);

    let client = state.require_upstream()?;
    let reply = client
        .get(route.path, token.as_str(), &params, route.context)
        .await?
        .ok_or_upstream(route.fallback)?;

    if wants_csv {
        let csv = rows_to_csv(report_rows(&reply.body))?;
        return Ok(csv_response(csv, route.csv_name));
    }

    Ok((StatusCode::OK, Json(reply.body)).into_response())
}

/// Removes the `format` parameter and reports whether CSV was requested.
fn take_csv_format(params: &mut Vec<(String, String)>) -> bool {
    let wants_csv = params
        .iter()
        .any(|(key, value)| key == "format" && value == "csv");
    params.retain(|(key, _)| key != "format");
    wants_csv
}

fn ensure_pagination_defaults(params: &mut Vec<(String, String)>) {
    if !params.iter().any(|(key, _)| key == "page") {
        params.push(("page".to_string(), "1".to_string()));
    }
    if !params.iter().any(|(key, _)| key == "per_page") {
        params.push(("per_page".to_string(), "20".to_string()));
    }
}

fn report_rows(body: &Value) -> &[Value] {
    body.get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn export_file_name(stem: &str, date_from: Option<&str>, date_to: Option<&str>) -> String {
    match (date_from, date_to) {
        (Some(from), Some(to)) => format!("{stem}-{from}-to-{to}.csv"),
        _ => format!("{stem}.csv"),
    }
}

fn csv_response(csv: String, file_name: &str) -> Response {
    let disposition = format!("attachment; filename=\"{file_name}\"");
    let headers = [
        (header::CONTENT_TYPE, "text/csv"),
        (header::CONTENT_DISPOSITION, disposition.as_str()),
    ];
    (headers, csv).into_response()
}
