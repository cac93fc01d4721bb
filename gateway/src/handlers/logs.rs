//! Activity log proxy handler

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::middleware::SessionToken;
use crate::AppState;

/// Recognized log filters; anything else in the query string is dropped.
#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    pub action: Option<String>,
    pub table_name: Option<String>,
    pub user_id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub per_page: Option<String>,
    pub page: Option<String>,
}

impl LogQuery {
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push_if_present(&mut params, "action", &self.action);
        push_if_present(&mut params, "table_name", &self.table_name);
        push_if_present(&mut params, "user_id", &self.user_id);
        push_if_present(&mut params, "date_from", &self.date_from);
        push_if_present(&mut params, "date_to", &self.date_to);
        push_if_present(&mut params, "per_page", &self.per_page);
        push_if_present(&mut params, "page", &self.page);
        params
    }
}

fn push_if_present(params: &mut Vec<(String, String)>, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        if !value.is_empty() {
            params.push((key.to_string(), value.clone()));
        }
    }
}

/// GET /api/logs
pub async fn list_logs(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Query(query): Query<LogQuery>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let params = query.to_params();

    let client = state.require_upstream()?;
    let reply = client
        .get("/logs", token.as_str(), &params, "fetching logs")
        .await?
        .ok_or_upstream("Failed to fetch logs")?;

    Ok((StatusCode::OK, Json(reply.body)))
}
