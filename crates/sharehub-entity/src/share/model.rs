//! Share record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One uploaded artifact and its sharing policy.
///
/// The record only owns metadata; the bytes live in the content-addressed
/// blob store under `cid` and are never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShareRecord {
    /// Unique record identifier (internal).
    pub id: Uuid,
    /// Short URL-safe public token, unique and immutable. External
    /// lookup key for all public access.
    pub download_id: String,
    /// Content identifier in the blob store. Set once at creation.
    pub cid: String,
    /// Retrieval URL for the pinned content.
    pub gateway_url: String,
    /// Original filename as uploaded.
    pub original_name: String,
    /// MIME type captured at upload time.
    pub mime_type: String,
    /// Size in bytes captured at upload time.
    pub size_bytes: i64,
    /// Uploading user, if any. `None` means anonymous upload.
    pub owner_id: Option<Uuid>,
    /// Argon2 hash of the access password, if one is set.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// When the share expires. `None` means never.
    pub expires_at: Option<DateTime<Utc>>,
    /// Maximum number of downloads. `None` means unlimited.
    pub max_downloads: Option<i32>,
    /// Number of recorded downloads. Only successful downloads increment
    /// this, and it never exceeds `max_downloads` when that is set.
    pub download_count: i32,
    /// Whether the share is active. Soft delete sets this to `false`.
    pub is_active: bool,
    /// IP address the upload came from.
    pub upload_ip: String,
    /// User-Agent header of the uploading client.
    pub user_agent: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ShareRecord {
    /// Whether the share has passed its expiration time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|expires| Utc::now() > expires)
    }

    /// Whether the download limit has been reached.
    pub fn is_download_limit_reached(&self) -> bool {
        self.max_downloads
            .is_some_and(|max| self.download_count >= max)
    }

    /// Whether the share can currently be downloaded.
    pub fn is_downloadable(&self) -> bool {
        self.is_active && !self.is_expired() && !self.is_download_limit_reached()
    }

    /// Whether access requires a password.
    pub fn requires_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Data required to create a new share record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareRecord {
    /// Generated download token.
    pub download_id: String,
    /// Content identifier from the blob store.
    pub cid: String,
    /// Retrieval URL for the pinned content.
    pub gateway_url: String,
    /// Original filename.
    pub original_name: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Uploading user (None = anonymous).
    pub owner_id: Option<Uuid>,
    /// Pre-hashed access password, if any.
    pub password_hash: Option<String>,
    /// Expiry time (None = never).
    pub expires_at: Option<DateTime<Utc>>,
    /// Max downloads (None = unlimited).
    pub max_downloads: Option<i32>,
    /// Upload origin IP.
    pub upload_ip: String,
    /// Upload client User-Agent.
    pub user_agent: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record() -> ShareRecord {
        let now = Utc::now();
        ShareRecord {
            id: Uuid::new_v4(),
            download_id: "a1B2c3D4".to_string(),
            cid: "bafybeigdyrzt5example".to_string(),
            gateway_url: "https://gateway.pinata.cloud/ipfs/bafybeigdyrzt5example".to_string(),
            original_name: "report.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size_bytes: 1024,
            owner_id: None,
            password_hash: None,
            expires_at: None,
            max_downloads: None,
            download_count: 0,
            is_active: true,
            upload_ip: "127.0.0.1".to_string(),
            user_agent: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_no_expiry_never_expires() {
        assert!(!record().is_expired());
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let mut r = record();
        r.expires_at = Some(Utc::now() - Duration::hours(1));
        assert!(r.is_expired());
        assert!(!r.is_downloadable());
    }

    #[test]
    fn test_download_limit() {
        let mut r = record();
        r.max_downloads = Some(2);
        r.download_count = 1;
        assert!(!r.is_download_limit_reached());
        r.download_count = 2;
        assert!(r.is_download_limit_reached());
        assert!(!r.is_downloadable());
    }

    #[test]
    fn test_inactive_is_not_downloadable() {
        let mut r = record();
        r.is_active = false;
        assert!(!r.is_downloadable());
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let mut r = record();
        r.password_hash = Some("$argon2id$...".to_string());
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("download_id").is_some());
    }
}
