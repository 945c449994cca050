//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use sharehub_auth::jwt::JwtCodec;
use sharehub_core::config::AppConfig;
use sharehub_core::traits::blob::BlobStore;
use sharehub_service::email::EmailService;
use sharehub_service::share::{AccessService, ShareService};
use sharehub_service::stats::StatsService;
use sharehub_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool (health probes).
    pub db_pool: PgPool,
    /// Pinning gateway client.
    pub blob_store: Arc<dyn BlobStore>,
    /// JWT codec for the auth extractor.
    pub jwt: Arc<JwtCodec>,
    /// Share lifecycle service.
    pub share_service: Arc<ShareService>,
    /// Public access service.
    pub access_service: Arc<AccessService>,
    /// Account service.
    pub user_service: Arc<UserService>,
    /// Dashboard statistics service.
    pub stats_service: Arc<StatsService>,
    /// Outbound email service.
    pub email_service: Arc<EmailService>,
}
