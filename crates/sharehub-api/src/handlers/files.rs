//! Dashboard file management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use sharehub_core::types::pagination::PageResponse;
use sharehub_entity::share::ShareRecord;
use sharehub_entity::store::ShareListFilter;
use sharehub_service::share::service::UpdateShareSettings;

use crate::error::ApiError;
use crate::dto::request::{FileListQuery, FileUpdateRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/files
///
/// Lists the caller's own uploads; administrators may pass `user_id`
/// to inspect another user's uploads.
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
    Query(filters): Query<FileListQuery>,
) -> Result<Json<ApiResponse<PageResponse<ShareRecord>>>, ApiError> {
    let page = pagination.into_page_request();

    let result = match filters.user_id {
        Some(user_id) if auth.is_admin() => {
            let filter = ShareListFilter {
                owner_id: Some(user_id),
                ..Default::default()
            };
            state.share_service.list_all(&auth.0, filter, page).await?
        }
        _ => state.share_service.list_own(&auth.0, page).await?,
    };

    Ok(Json(ApiResponse::ok(result)))
}

/// PATCH /api/files/{download_id}
pub async fn update_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(download_id): Path<String>,
    Json(req): Json<FileUpdateRequest>,
) -> Result<Json<ApiResponse<ShareRecord>>, ApiError> {
    let changes = match req {
        FileUpdateRequest::ToggleActive => {
            let current = state.share_service.get_managed(&auth.0, &download_id).await?;
            UpdateShareSettings {
                is_active: Some(!current.is_active),
                ..Default::default()
            }
        }
        FileUpdateRequest::UpdateSettings {
            max_downloads,
            expires_at,
            password,
        } => UpdateShareSettings {
            max_downloads,
            expires_at,
            password,
            is_active: None,
        },
    };

    let record = state
        .share_service
        .update_settings(&auth.0, &download_id, changes)
        .await?;

    Ok(Json(ApiResponse::ok(record)))
}

/// DELETE /api/files/{download_id} (soft delete).
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(download_id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .share_service
        .soft_delete(&auth.0, &download_id)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "File deleted successfully",
    ))))
}
