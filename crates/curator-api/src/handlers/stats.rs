//! Statistics HTTP handlers.

use axum::extract::State;
use axum::Json;

use curator_core::{DashboardStats, StatsRepository};

use crate::{ApiError, AppState};

/// Dashboard summary counts.
pub async fn dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, ApiError> {
    let stats = state.db.stats.dashboard().await?;
    Ok(Json(stats))
}

/// Document counts grouped by department.
pub async fn department_stats(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let departments = state.db.stats.by_department().await?;
    Ok(Json(serde_json::json!({ "departments": departments })))
}
