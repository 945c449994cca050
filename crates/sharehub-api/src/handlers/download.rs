//! Public download handlers: preview and byte transfer.

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::Response;

use sharehub_core::error::AppError;

use crate::error::ApiError;
use crate::dto::request::{DownloadQuery, PreviewRequest};
use crate::dto::response::{ApiResponse, PreviewResponse};
use crate::state::AppState;

/// GET /api/download/{download_id}?password=
///
/// Records the download (the counter moves before bytes flow; an aborted
/// transfer still counts), then streams the content from the gateway.
pub async fn download_file(
    State(state): State<AppState>,
    Path(download_id): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let locator = state
        .access_service
        .record_download(&download_id, query.password.as_deref())
        .await?;

    let stream = state.blob_store.fetch(&locator.cid).await?;

    Response::builder()
        .header(header::CONTENT_TYPE, locator.mime_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                locator.original_name.replace('"', "")
            ),
        )
        .header(header::CONTENT_LENGTH, locator.size_bytes)
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::internal(format!("Failed to build response: {e}")).into())
}

/// POST /api/download/{download_id}
///
/// Read-only preview: validates access (including the password gate)
/// and returns the descriptor without touching the download counter.
pub async fn preview_file(
    State(state): State<AppState>,
    Path(download_id): Path<String>,
    Json(req): Json<PreviewRequest>,
) -> Result<Json<ApiResponse<PreviewResponse>>, ApiError> {
    let record = state
        .access_service
        .resolve_for_access(&download_id, req.password.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok(PreviewResponse::from(&record))))
}
