//! Administrative file management.

use axum::Json;
use axum::extract::{Path, Query, State};

use sharehub_core::error::AppError;
use sharehub_core::types::pagination::PageResponse;
use sharehub_entity::share::ShareRecord;
use sharehub_entity::store::{ShareListFilter, ShareStatusFilter};

use crate::error::ApiError;
use crate::dto::request::FileListQuery;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/files?search=&status=
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
    Query(filters): Query<FileListQuery>,
) -> Result<Json<ApiResponse<PageResponse<ShareRecord>>>, ApiError> {
    let status = match filters.status.as_deref() {
        None | Some("") => None,
        Some("active") => Some(ShareStatusFilter::Active),
        Some("expired") => Some(ShareStatusFilter::Expired),
        Some(other) => {
            return Err(AppError::validation(format!(
                "Invalid status filter: '{other}'. Expected 'active' or 'expired'"
            ))
            .into());
        }
    };

    let filter = ShareListFilter {
        name_contains: filters.search.filter(|s| !s.is_empty()),
        status,
        owner_id: filters.user_id,
    };

    let files = state
        .share_service
        .list_all(&auth.0, filter, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// DELETE /api/admin/files/{download_id} (hard delete).
///
/// Removes the metadata record only; pinned bytes stay in the blob store.
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(download_id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .share_service
        .hard_delete(&auth.0, &download_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "File removed permanently",
    ))))
}
