//! Dashboard handler

use axum::{extract::State, Extension, Json};

use shared::SessionIdentity;

use crate::error::AppResult;
use crate::middleware::SessionToken;
use crate::services::dashboard::{DashboardResponse, DashboardService};
use crate::AppState;

/// GET /api/dashboard
///
/// Aggregates the first page of the four reports into one payload. Report
/// failures degrade their section to zeros instead of failing the request.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Extension(identity): Extension<SessionIdentity>,
) -> AppResult<Json<DashboardResponse>> {
    let client = state.require_upstream()?;
    let service = DashboardService::new(client.clone());
    let dashboard = service.build(token.as_str(), &identity.scope()).await;

    Ok(Json(dashboard))
}
