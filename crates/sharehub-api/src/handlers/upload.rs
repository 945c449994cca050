//! Upload handler: multipart upload → pin → share record.

use axum::Json;
use axum::extract::{Multipart, State};
use bytes::Bytes;

use sharehub_core::error::AppError;
use sharehub_service::share::service::CreateShareRequest;

use crate::error::ApiError;
use crate::dto::response::{ApiResponse, UploadResponse};
use crate::extractors::MaybeAuthUser;
use crate::state::AppState;

/// Parsed multipart upload form.
#[derive(Default)]
struct UploadForm {
    file_bytes: Option<Bytes>,
    original_name: Option<String>,
    mime_type: Option<String>,
    max_downloads: Option<i32>,
    expires_in_hours: Option<i64>,
    password: Option<String>,
}

/// POST /api/upload
///
/// Accepts a `file` part plus optional `max_downloads`, `expires_in`
/// (hours), and `password` fields. Works anonymously.
pub async fn upload_file(
    State(state): State<AppState>,
    auth: MaybeAuthUser,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponse>>, ApiError> {
    let form = parse_form(multipart).await?;

    let bytes = form
        .file_bytes
        .ok_or_else(|| AppError::validation("No file provided"))?;
    let original_name = form
        .original_name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::validation("File name is missing"))?;
    let mime_type = form
        .mime_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let size_bytes = bytes.len() as i64;

    // Reject policy violations before spending a gateway round trip.
    state
        .share_service
        .validate_upload(size_bytes, &mime_type)?;

    let pin = state
        .blob_store
        .pin_file(bytes, &original_name, &mime_type)
        .await?;

    let record = state
        .share_service
        .create_share(
            &auth.0,
            CreateShareRequest {
                pin,
                original_name,
                mime_type,
                size_bytes,
                expires_in_hours: form.expires_in_hours,
                max_downloads: form.max_downloads,
                password: form.password,
            },
        )
        .await?;

    let download_url = state.share_service.download_url(&record);
    Ok(Json(ApiResponse::ok(UploadResponse {
        download_id: record.download_id,
        download_url,
        cid: record.cid,
        original_name: record.original_name,
        size_bytes: record.size_bytes,
        expires_at: record.expires_at,
        max_downloads: record.max_downloads,
        requires_password: record.password_hash.is_some(),
    })))
}

async fn parse_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                form.original_name = field.file_name().map(str::to_string);
                form.mime_type = field.content_type().map(str::to_string);
                form.file_bytes = Some(field.bytes().await.map_err(|e| {
                    AppError::validation(format!("Failed to read upload: {e}"))
                })?);
            }
            Some("max_downloads") => {
                let text = read_text(field).await?;
                if !text.is_empty() {
                    form.max_downloads = Some(text.parse().map_err(|_| {
                        AppError::validation("max_downloads must be an integer")
                    })?);
                }
            }
            Some("expires_in") => {
                let text = read_text(field).await?;
                if !text.is_empty() {
                    form.expires_in_hours = Some(text.parse().map_err(|_| {
                        AppError::validation("expires_in must be a number of hours")
                    })?);
                }
            }
            Some("password") => {
                let text = read_text(field).await?;
                if !text.is_empty() {
                    form.password = Some(text);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Invalid form field: {e}")).into())
}
