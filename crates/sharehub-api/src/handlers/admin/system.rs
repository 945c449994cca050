//! Administrative system probes: email, database, pinning gateway.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use sharehub_auth::policy;

use crate::error::ApiError;
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Health probe result.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResponse {
    /// Whether the probed dependency responded.
    pub healthy: bool,
}

/// POST /api/admin/test-email
pub async fn test_email(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<ProbeResponse>>, ApiError> {
    policy::require_admin(auth.identity())?;

    let healthy = state.email_service.test_configuration().await?;
    Ok(Json(ApiResponse::ok(ProbeResponse { healthy })))
}

/// GET /api/admin/health/database
pub async fn health_database(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<ProbeResponse>>, ApiError> {
    policy::require_admin(auth.identity())?;

    let healthy = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
        .map(|v| v == 1)
        .unwrap_or(false);

    Ok(Json(ApiResponse::ok(ProbeResponse { healthy })))
}

/// GET /api/admin/health/ipfs
pub async fn health_ipfs(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<ProbeResponse>>, ApiError> {
    policy::require_admin(auth.identity())?;

    let healthy = state
        .blob_store
        .test_authentication()
        .await
        .unwrap_or(false);

    Ok(Json(ApiResponse::ok(ProbeResponse { healthy })))
}
