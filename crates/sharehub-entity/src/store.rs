//! Metadata store contracts.
//!
//! Services depend on these traits rather than a concrete database, so
//! the persistence backend stays swappable and the lifecycle logic is
//! testable against an in-memory implementation. The PostgreSQL
//! implementations live in `sharehub-database`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sharehub_core::result::AppResult;
use sharehub_core::types::pagination::{PageRequest, PageResponse};

use crate::share::{CreateShareRecord, ShareRecord};
use crate::user::User;

/// Filter for the administrative share listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShareListFilter {
    /// Substring match on the original filename.
    pub name_contains: Option<String>,
    /// Restrict by expiry state.
    pub status: Option<ShareStatusFilter>,
    /// Restrict to a single uploader.
    pub owner_id: Option<Uuid>,
}

/// Expiry-state filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareStatusFilter {
    /// Not yet expired (or never expiring).
    Active,
    /// Past the expiry timestamp.
    Expired,
}

/// Aggregate counters for dashboards.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ShareTotals {
    /// Number of share records.
    pub total_files: u64,
    /// Sum of all download counters.
    pub total_downloads: u64,
    /// Sum of all stored sizes in bytes.
    pub total_bytes: u64,
}

/// Persistence contract for [`ShareRecord`]s.
#[async_trait]
pub trait ShareStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new record. Fails with a conflict error if the
    /// `download_id` is already taken.
    async fn insert(&self, data: &CreateShareRecord) -> AppResult<ShareRecord>;

    /// Find a record by its public download token, active or not.
    async fn find_by_download_id(&self, download_id: &str) -> AppResult<Option<ShareRecord>>;

    /// Check whether a download token is already in use.
    async fn download_id_exists(&self, download_id: &str) -> AppResult<bool>;

    /// Persist updated settings fields of an existing record.
    async fn update(&self, record: &ShareRecord) -> AppResult<ShareRecord>;

    /// Atomically increment the download counter only while the
    /// record is still active, unexpired, and below its download limit.
    ///
    /// The check and the increment must execute as one conditional
    /// read-modify-write in the store; two concurrent calls against a
    /// record with one download remaining must produce exactly one
    /// success. Returns the updated record, or `None` when the gate was
    /// closed (the caller decides how to report that).
    async fn record_download(&self, download_id: &str) -> AppResult<Option<ShareRecord>>;

    /// List records uploaded by a user, newest first.
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ShareRecord>>;

    /// List records across all users with optional filters, newest first.
    async fn list_filtered(
        &self,
        filter: &ShareListFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ShareRecord>>;

    /// Physically remove a record. Returns `true` if a row was deleted.
    /// Does not touch the blob store.
    async fn delete(&self, download_id: &str) -> AppResult<bool>;

    /// Aggregate counters across all records.
    async fn totals(&self) -> AppResult<ShareTotals>;
}

/// Persistence contract for [`User`]s.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new user. Fails with a conflict error on duplicate email.
    async fn insert(&self, user: &User) -> AppResult<User>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by outstanding password reset token.
    async fn find_by_reset_token(&self, token: &str) -> AppResult<Option<User>>;

    /// Persist updated fields of an existing user.
    async fn update(&self, user: &User) -> AppResult<User>;

    /// List users, newest first.
    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<User>>;

    /// Count all users.
    async fn count(&self) -> AppResult<u64>;
}
