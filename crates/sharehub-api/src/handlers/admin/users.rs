//! Administrative user management.

use axum::Json;
use axum::extract::{Query, State};

use sharehub_core::types::pagination::PageResponse;
use sharehub_entity::user::User;
use sharehub_service::user::RoleAction;

use crate::error::ApiError;
use crate::dto::request::ChangeRoleRequest;
use crate::dto::response::ApiResponse;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<User>>>, ApiError> {
    let users = state
        .user_service
        .list_users(&auth.0, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// POST /api/admin/users/role
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangeRoleRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let action: RoleAction = req.action.parse()?;
    let user = state
        .user_service
        .promote_or_demote(&auth.0, &req.email, action)
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}
