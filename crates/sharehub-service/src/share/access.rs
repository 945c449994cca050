//! Public share access: resolution checks and download recording.

use std::sync::Arc;

use tracing::info;

use sharehub_auth::password::PasswordHasher;
use sharehub_core::error::AppError;
use sharehub_core::result::AppResult;
use sharehub_entity::share::ShareRecord;
use sharehub_entity::store::ShareStore;

/// Everything a caller needs to stream the bytes of a resolved share.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BlobLocator {
    /// Content identifier in the blob store.
    pub cid: String,
    /// Retrieval URL for the content.
    pub gateway_url: String,
    /// MIME type for the response headers.
    pub mime_type: String,
    /// Size in bytes for the response headers.
    pub size_bytes: i64,
    /// Filename for the Content-Disposition header.
    pub original_name: String,
}

impl From<&ShareRecord> for BlobLocator {
    fn from(record: &ShareRecord) -> Self {
        Self {
            cid: record.cid.clone(),
            gateway_url: record.gateway_url.clone(),
            mime_type: record.mime_type.clone(),
            size_bytes: record.size_bytes,
            original_name: record.original_name.clone(),
        }
    }
}

/// Validates public access to shares and records downloads.
#[derive(Debug, Clone)]
pub struct AccessService {
    /// Share record store.
    store: Arc<dyn ShareStore>,
    /// Password hasher for access password verification.
    hasher: Arc<PasswordHasher>,
}

impl AccessService {
    /// Creates a new access service.
    pub fn new(store: Arc<dyn ShareStore>, hasher: Arc<PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    /// Resolves a share for access without recording a download.
    ///
    /// A soft-deleted record is indistinguishable from a missing one.
    /// Expiry and the download limit are reported as `Gone`; the
    /// password gate distinguishes a missing password from a wrong one.
    pub async fn resolve_for_access(
        &self,
        download_id: &str,
        supplied_password: Option<&str>,
    ) -> AppResult<ShareRecord> {
        let record = self
            .store
            .find_by_download_id(download_id)
            .await?
            .filter(|record| record.is_active)
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if record.is_expired() {
            return Err(AppError::gone("File has expired"));
        }

        if record.is_download_limit_reached() {
            return Err(AppError::gone("Download limit reached"));
        }

        if let Some(ref hash) = record.password_hash {
            match supplied_password {
                None => {
                    return Err(AppError::password_required(
                        "This file is password protected",
                    ));
                }
                Some(password) => {
                    if !self.hasher.verify_password(password, hash)? {
                        return Err(AppError::password_mismatch("Invalid password"));
                    }
                }
            }
        }

        Ok(record)
    }

    /// Records a download and returns the blob locator to stream from.
    ///
    /// Re-runs the full access check at the moment of transfer, then
    /// relies on the store's single conditional update for the counter.
    /// Losing a concurrent race on the last remaining download reports
    /// `Gone`, never a retry. This is the only path that increments
    /// `download_count`.
    pub async fn record_download(
        &self,
        download_id: &str,
        supplied_password: Option<&str>,
    ) -> AppResult<BlobLocator> {
        self.resolve_for_access(download_id, supplied_password)
            .await?;

        let record = self
            .store
            .record_download(download_id)
            .await?
            .ok_or_else(|| AppError::gone("Download limit reached"))?;

        info!(
            download_id = %download_id,
            download_count = record.download_count,
            "Download recorded"
        );

        Ok(BlobLocator::from(&record))
    }
}
