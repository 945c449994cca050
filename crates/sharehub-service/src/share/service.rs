//! Share creation, listing, settings, and deletion.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use sharehub_auth::password::PasswordHasher;
use sharehub_auth::policy;
use sharehub_core::config::upload::UploadConfig;
use sharehub_core::error::AppError;
use sharehub_core::result::AppResult;
use sharehub_core::traits::blob::PinOutcome;
use sharehub_core::types::pagination::{PageRequest, PageResponse};
use sharehub_entity::share::{CreateShareRecord, ShareRecord};
use sharehub_entity::store::{ShareListFilter, ShareStore};

use super::link::LinkGenerator;
use crate::context::RequestContext;

/// Attempts at generating a collision-free download token before the
/// operation is abandoned.
const MAX_TOKEN_ATTEMPTS: u32 = 8;

/// Manages share record creation, listing, settings, and deletion.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Share record store.
    store: Arc<dyn ShareStore>,
    /// Password hasher for access passwords.
    hasher: Arc<PasswordHasher>,
    /// Download token generator.
    links: Arc<LinkGenerator>,
    /// Upload policy limits.
    upload_policy: UploadConfig,
}

/// Request to create a share from an already-pinned upload.
#[derive(Debug, Clone)]
pub struct CreateShareRequest {
    /// Outcome of the completed blob store upload.
    pub pin: PinOutcome,
    /// Original filename.
    pub original_name: String,
    /// MIME type of the upload.
    pub mime_type: String,
    /// Size in bytes of the upload.
    pub size_bytes: i64,
    /// Hours until expiry (None = never expires).
    pub expires_in_hours: Option<i64>,
    /// Download cap (None = unlimited).
    pub max_downloads: Option<i32>,
    /// Access password (None or empty = no password).
    pub password: Option<String>,
}

/// Settings changes applied to an existing share.
///
/// Outer `None` leaves a field untouched; inner `None` clears it.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateShareSettings {
    /// Update the download cap.
    pub max_downloads: Option<Option<i32>>,
    /// Update the expiry time.
    pub expires_at: Option<Option<DateTime<Utc>>>,
    /// Update the access password (re-hashed on change).
    pub password: Option<Option<String>>,
    /// Toggle active state in either direction; setting `true` is the one
    /// documented reactivate path.
    pub is_active: Option<bool>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        store: Arc<dyn ShareStore>,
        hasher: Arc<PasswordHasher>,
        links: Arc<LinkGenerator>,
        upload_policy: UploadConfig,
    ) -> Self {
        Self {
            store,
            hasher,
            links,
            upload_policy,
        }
    }

    /// Validate descriptor fields against the upload policy.
    ///
    /// Called by the upload handler before bytes are pinned, and again
    /// inside [`create_share`](Self::create_share).
    pub fn validate_upload(&self, size_bytes: i64, mime_type: &str) -> AppResult<()> {
        if size_bytes <= 0 {
            return Err(AppError::validation("File is empty"));
        }
        if size_bytes as u64 > self.upload_policy.max_file_size_bytes {
            return Err(AppError::quota_exceeded(format!(
                "File too large. Maximum size is {} MB",
                self.upload_policy.max_file_size_bytes / (1024 * 1024)
            )));
        }
        if !self.upload_policy.allows_mime_type(mime_type) {
            return Err(AppError::quota_exceeded(format!(
                "File type {mime_type} is not allowed"
            )));
        }
        Ok(())
    }

    /// Creates a new share record for a completed upload.
    pub async fn create_share(
        &self,
        ctx: &RequestContext,
        req: CreateShareRequest,
    ) -> AppResult<ShareRecord> {
        self.validate_upload(req.size_bytes, &req.mime_type)?;

        if let Some(hours) = req.expires_in_hours {
            if hours <= 0 {
                return Err(AppError::validation("expires_in_hours must be positive"));
            }
        }
        if let Some(max) = req.max_downloads {
            if max <= 0 {
                return Err(AppError::validation("max_downloads must be positive"));
            }
        }

        let password_hash = match req.password.as_deref() {
            Some(password) if !password.is_empty() => {
                Some(self.hasher.hash_password(password)?)
            }
            _ => None,
        };

        let expires_at = req
            .expires_in_hours
            .map(|hours| Utc::now() + Duration::hours(hours));

        let mut attempts = 0;
        let record = loop {
            attempts += 1;
            if attempts > MAX_TOKEN_ATTEMPTS {
                return Err(AppError::internal(
                    "Could not allocate a unique download ID",
                ));
            }

            let download_id = self.links.generate_download_id();
            if self.store.download_id_exists(&download_id).await? {
                warn!(attempts, "Download ID collision, regenerating");
                continue;
            }

            let data = CreateShareRecord {
                download_id,
                cid: req.pin.cid.clone(),
                gateway_url: req.pin.gateway_url.clone(),
                original_name: req.original_name.clone(),
                mime_type: req.mime_type.clone(),
                size_bytes: req.size_bytes,
                owner_id: ctx.identity().map(|who| who.id),
                password_hash: password_hash.clone(),
                expires_at,
                max_downloads: req.max_downloads,
                upload_ip: ctx.ip_address.clone(),
                user_agent: ctx.user_agent.clone(),
            };

            match self.store.insert(&data).await {
                Ok(record) => break record,
                // Unique violation lost against a concurrent insert;
                // regenerate and try again.
                Err(e) if e.kind == sharehub_core::error::ErrorKind::Conflict => {
                    warn!(attempts, "Download ID taken concurrently, regenerating");
                    continue;
                }
                Err(e) => return Err(e),
            }
        };

        info!(
            download_id = %record.download_id,
            cid = %record.cid,
            size = record.size_bytes,
            anonymous = record.owner_id.is_none(),
            "Share created"
        );

        Ok(record)
    }

    /// Public download URL for a record.
    pub fn download_url(&self, record: &ShareRecord) -> String {
        self.links.download_url(&record.download_id)
    }

    /// Lists shares uploaded by the current user.
    pub async fn list_own(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<ShareRecord>> {
        let who = ctx
            .identity()
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;
        self.store.list_by_owner(who.id, &page).await
    }

    /// Lists shares across all users (administrative).
    pub async fn list_all(
        &self,
        ctx: &RequestContext,
        filter: ShareListFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<ShareRecord>> {
        policy::require_admin(ctx.identity())?;
        self.store.list_filtered(&filter, &page).await
    }

    /// Fetches a record the requester is allowed to manage.
    pub async fn get_managed(
        &self,
        ctx: &RequestContext,
        download_id: &str,
    ) -> AppResult<ShareRecord> {
        let record = self
            .store
            .find_by_download_id(download_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        policy::require_manage(ctx.identity(), &record)?;
        Ok(record)
    }

    /// Applies settings changes to a record.
    pub async fn update_settings(
        &self,
        ctx: &RequestContext,
        download_id: &str,
        changes: UpdateShareSettings,
    ) -> AppResult<ShareRecord> {
        let mut record = self.get_managed(ctx, download_id).await?;

        if let Some(max_downloads) = changes.max_downloads {
            if let Some(max) = max_downloads {
                if max <= 0 {
                    return Err(AppError::validation("max_downloads must be positive"));
                }
            }
            record.max_downloads = max_downloads;
        }
        if let Some(expires_at) = changes.expires_at {
            record.expires_at = expires_at;
        }
        if let Some(password) = changes.password {
            record.password_hash = match password.as_deref() {
                Some(p) if !p.is_empty() => Some(self.hasher.hash_password(p)?),
                _ => None,
            };
        }
        if let Some(is_active) = changes.is_active {
            record.is_active = is_active;
        }

        let record = self.store.update(&record).await?;

        info!(download_id = %download_id, "Share settings updated");
        Ok(record)
    }

    /// Soft-deletes a record (marks it inactive).
    pub async fn soft_delete(&self, ctx: &RequestContext, download_id: &str) -> AppResult<()> {
        let mut record = self.get_managed(ctx, download_id).await?;
        record.is_active = false;
        self.store.update(&record).await?;

        info!(download_id = %download_id, "Share soft-deleted");
        Ok(())
    }

    /// Physically removes a record (administrative).
    ///
    /// Pinned bytes stay in the blob store; content-addressed pins are
    /// treated as immutable and shared.
    pub async fn hard_delete(&self, ctx: &RequestContext, download_id: &str) -> AppResult<()> {
        policy::require_admin(ctx.identity())?;

        if !self.store.delete(download_id).await? {
            return Err(AppError::not_found("File not found"));
        }

        info!(download_id = %download_id, "Share hard-deleted; pinned bytes retained");
        Ok(())
    }
}
