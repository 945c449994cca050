//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sharehub_entity::share::ShareRecord;
use sharehub_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Signed access token.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: User,
}

/// Upload response: the shareable result of a completed upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    /// Public download token.
    pub download_id: String,
    /// Full download URL (what a QR code would encode).
    pub download_url: String,
    /// Content identifier in the blob store.
    pub cid: String,
    /// Original filename.
    pub original_name: String,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Expiry time, if any.
    pub expires_at: Option<DateTime<Utc>>,
    /// Download cap, if any.
    pub max_downloads: Option<i32>,
    /// Whether access requires a password.
    pub requires_password: bool,
}

/// Download preview: descriptor without recording a download.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewResponse {
    /// Original filename.
    pub original_name: String,
    /// Size in bytes.
    pub size_bytes: i64,
    /// MIME type.
    pub mime_type: String,
    /// Downloads recorded so far.
    pub download_count: i32,
    /// Download cap, if any.
    pub max_downloads: Option<i32>,
    /// Expiry time, if any.
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&ShareRecord> for PreviewResponse {
    fn from(record: &ShareRecord) -> Self {
        Self {
            original_name: record.original_name.clone(),
            size_bytes: record.size_bytes,
            mime_type: record.mime_type.clone(),
            download_count: record.download_count,
            max_downloads: record.max_downloads,
            expires_at: record.expires_at,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}
