//! Request DTOs.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// POST /api/auth/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// POST /api/auth/forgot-password
#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordRequest {
    /// Email address to send the reset link to.
    pub email: String,
}

/// GET /api/auth/verify-reset-token
#[derive(Debug, Clone, Deserialize)]
pub struct ResetTokenQuery {
    /// Reset token from the emailed link.
    pub token: String,
}

/// POST /api/auth/reset-password
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    /// Reset token from the emailed link.
    pub token: String,
    /// New account password.
    pub password: String,
}

/// `?password=` on the public download route.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadQuery {
    /// Share access password, if the share requires one.
    pub password: Option<String>,
}

/// POST /api/download/{download_id} preview body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewRequest {
    /// Share access password, if the share requires one.
    pub password: Option<String>,
}

/// PATCH /api/files/{download_id}
///
/// For the settings fields, a missing key leaves the value untouched
/// while an explicit `null` clears it.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FileUpdateRequest {
    /// Flip the active flag.
    ToggleActive,
    /// Apply new sharing settings.
    UpdateSettings {
        /// New download cap.
        #[serde(default)]
        max_downloads: Option<Option<i32>>,
        /// New expiry time.
        #[serde(default)]
        expires_at: Option<Option<DateTime<Utc>>>,
        /// New access password.
        #[serde(default)]
        password: Option<Option<String>>,
    },
}

/// Query filters for file listings.
#[derive(Debug, Clone, Deserialize)]
pub struct FileListQuery {
    /// Filename substring filter (admin listing).
    pub search: Option<String>,
    /// Expiry-state filter: "active" or "expired" (admin listing).
    pub status: Option<String>,
    /// Restrict to one uploader (admin listing).
    pub user_id: Option<Uuid>,
}

/// POST /api/admin/users/role
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeRoleRequest {
    /// Email of the target user.
    pub email: String,
    /// "promote" or "demote".
    pub action: String,
}
