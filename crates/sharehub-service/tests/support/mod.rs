//! Shared test fixtures: in-memory stores and wired services.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use sharehub_auth::jwt::JwtCodec;
use sharehub_auth::password::{PasswordHasher, PasswordValidator};
use sharehub_core::config::auth::AuthConfig;
use sharehub_core::config::upload::UploadConfig;
use sharehub_core::error::AppError;
use sharehub_core::result::AppResult;
use sharehub_core::traits::blob::PinOutcome;
use sharehub_core::types::pagination::{PageRequest, PageResponse};
use sharehub_entity::share::{CreateShareRecord, ShareRecord};
use sharehub_entity::store::{ShareListFilter, ShareStatusFilter, ShareStore, ShareTotals, UserStore};
use sharehub_entity::user::{IdentityRef, User};
use sharehub_service::RequestContext;
use sharehub_service::email::EmailService;
use sharehub_service::share::{AccessService, LinkGenerator, ShareService};
use sharehub_service::share::service::CreateShareRequest;
use sharehub_service::user::UserService;

pub const BASE_URL: &str = "http://localhost:8080";
pub const OWNER_EMAIL: &str = "owner@example.com";

/// In-memory [`ShareStore`] keyed by download ID.
///
/// All mutations run under one mutex, which makes `record_download`'s
/// check-and-increment atomic the same way the SQL conditional update is.
#[derive(Debug, Default)]
pub struct MemoryShareStore {
    records: Mutex<HashMap<String, ShareRecord>>,
}

#[async_trait]
impl ShareStore for MemoryShareStore {
    async fn insert(&self, data: &CreateShareRecord) -> AppResult<ShareRecord> {
        let mut records = self.records.lock().unwrap();
        if records.contains_key(&data.download_id) {
            return Err(AppError::conflict("Download ID is already in use"));
        }
        let now = Utc::now();
        let record = ShareRecord {
            id: Uuid::new_v4(),
            download_id: data.download_id.clone(),
            cid: data.cid.clone(),
            gateway_url: data.gateway_url.clone(),
            original_name: data.original_name.clone(),
            mime_type: data.mime_type.clone(),
            size_bytes: data.size_bytes,
            owner_id: data.owner_id,
            password_hash: data.password_hash.clone(),
            expires_at: data.expires_at,
            max_downloads: data.max_downloads,
            download_count: 0,
            is_active: true,
            upload_ip: data.upload_ip.clone(),
            user_agent: data.user_agent.clone(),
            created_at: now,
            updated_at: now,
        };
        records.insert(record.download_id.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_download_id(&self, download_id: &str) -> AppResult<Option<ShareRecord>> {
        Ok(self.records.lock().unwrap().get(download_id).cloned())
    }

    async fn download_id_exists(&self, download_id: &str) -> AppResult<bool> {
        Ok(self.records.lock().unwrap().contains_key(download_id))
    }

    async fn update(&self, record: &ShareRecord) -> AppResult<ShareRecord> {
        let mut records = self.records.lock().unwrap();
        let stored = records
            .get_mut(&record.download_id)
            .ok_or_else(|| AppError::not_found("File not found"))?;
        stored.password_hash = record.password_hash.clone();
        stored.expires_at = record.expires_at;
        stored.max_downloads = record.max_downloads;
        stored.is_active = record.is_active;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn record_download(&self, download_id: &str) -> AppResult<Option<ShareRecord>> {
        let mut records = self.records.lock().unwrap();
        let Some(record) = records.get_mut(download_id) else {
            return Ok(None);
        };
        if !record.is_downloadable() {
            return Ok(None);
        }
        record.download_count += 1;
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ShareRecord>> {
        let records = self.records.lock().unwrap();
        let mut matching: Vec<ShareRecord> = records
            .values()
            .filter(|r| r.owner_id == Some(owner_id))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(matching, page))
    }

    async fn list_filtered(
        &self,
        filter: &ShareListFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ShareRecord>> {
        let records = self.records.lock().unwrap();
        let mut matching: Vec<ShareRecord> = records
            .values()
            .filter(|r| {
                filter.name_contains.as_ref().is_none_or(|needle| {
                    r.original_name
                        .to_lowercase()
                        .contains(&needle.to_lowercase())
                })
            })
            .filter(|r| match filter.status {
                Some(ShareStatusFilter::Expired) => r.is_expired(),
                Some(ShareStatusFilter::Active) => !r.is_expired(),
                None => true,
            })
            .filter(|r| filter.owner_id.is_none_or(|owner| r.owner_id == Some(owner)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(matching, page))
    }

    async fn delete(&self, download_id: &str) -> AppResult<bool> {
        Ok(self.records.lock().unwrap().remove(download_id).is_some())
    }

    async fn totals(&self) -> AppResult<ShareTotals> {
        let records = self.records.lock().unwrap();
        Ok(ShareTotals {
            total_files: records.len() as u64,
            total_downloads: records.values().map(|r| r.download_count as u64).sum(),
            total_bytes: records.values().map(|r| r.size_bytes as u64).sum(),
        })
    }
}

/// In-memory [`UserStore`] keyed by user ID.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(AppError::conflict("Email is already registered"));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_reset_token(&self, token: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.reset_token.as_deref() == Some(token))
            .cloned())
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let stored = users
            .get_mut(&user.id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        *stored = user.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        let users = self.users.lock().unwrap();
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(all, page))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }
}

fn paginate<T: serde::Serialize + Clone>(items: Vec<T>, page: &PageRequest) -> PageResponse<T> {
    let total = items.len() as u64;
    let page_items: Vec<T> = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    PageResponse::new(page_items, page.page, page.page_size, total)
}

/// Fully wired services on in-memory stores.
pub struct TestEnv {
    pub shares: Arc<MemoryShareStore>,
    pub users: Arc<MemoryUserStore>,
    pub share_service: ShareService,
    pub access: AccessService,
    pub user_service: UserService,
}

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret-key-for-lifecycle-tests".to_string(),
        token_ttl_minutes: 60,
        owner_email: Some(OWNER_EMAIL.to_string()),
        password_min_length: 6,
        reset_token_ttl_minutes: 60,
    }
}

pub fn test_env() -> TestEnv {
    let shares = Arc::new(MemoryShareStore::default());
    let users = Arc::new(MemoryUserStore::default());
    let hasher = Arc::new(PasswordHasher::new());
    let links = Arc::new(LinkGenerator::new(BASE_URL, 8));
    let config = auth_config();

    let share_service = ShareService::new(
        shares.clone() as Arc<dyn ShareStore>,
        hasher.clone(),
        links.clone(),
        UploadConfig::default(),
    );
    let access = AccessService::new(shares.clone() as Arc<dyn ShareStore>, hasher.clone());
    let user_service = UserService::new(
        users.clone() as Arc<dyn UserStore>,
        hasher.clone(),
        Arc::new(PasswordValidator::new(&config)),
        Arc::new(JwtCodec::new(&config)),
        Arc::new(EmailService::disabled()),
        links,
        &config,
    );

    TestEnv {
        shares,
        users,
        share_service,
        access,
        user_service,
    }
}

/// A pin outcome standing in for a completed gateway upload.
pub fn pin_outcome() -> PinOutcome {
    PinOutcome {
        cid: "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi".to_string(),
        size_bytes: 1024,
        gateway_url: "https://gateway.pinata.cloud/ipfs/bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi"
            .to_string(),
    }
}

/// A create request with no expiry, no limit, no password.
pub fn create_request() -> CreateShareRequest {
    CreateShareRequest {
        pin: pin_outcome(),
        original_name: "notes.txt".to_string(),
        mime_type: "text/plain".to_string(),
        size_bytes: 1024,
        expires_in_hours: None,
        max_downloads: None,
        password: None,
    }
}

pub fn anon_ctx() -> RequestContext {
    RequestContext::anonymous("127.0.0.1".to_string(), Some("tests".to_string()))
}

pub fn ctx_for(user: &User) -> RequestContext {
    RequestContext::authenticated(
        IdentityRef::from(user),
        "127.0.0.1".to_string(),
        Some("tests".to_string()),
    )
}

/// Registers a user with a policy-passing password.
pub async fn register(env: &TestEnv, name: &str, email: &str) -> User {
    env.user_service
        .register(sharehub_service::user::RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: "correct-horse-7battery".to_string(),
        })
        .await
        .expect("registration failed")
}
