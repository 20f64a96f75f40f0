//! Dashboard handler

use axum::{extract::State, Json};

use crate::app::DashboardSummary;
use crate::error::AppError;
use crate::ApiState;

/// GET /dashboard
pub async fn get_dashboard(
    State(state): State<ApiState>,
) -> Result<Json<DashboardSummary>, AppError> {
    Ok(Json(state.dashboard.summary().await?))
}
