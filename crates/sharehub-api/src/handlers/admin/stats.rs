//! Administrative dashboard statistics.

use axum::Json;
use axum::extract::State;

use sharehub_service::stats::DashboardStats;

use crate::error::ApiError;
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/stats
pub async fn dashboard_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    let stats = state.stats_service.dashboard(&auth.0).await?;
    Ok(Json(ApiResponse::ok(stats)))
}
