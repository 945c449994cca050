//! FileShare Hub server.
//!
//! Main entry point that wires all crates together and starts the
//! HTTP server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use sharehub_api::router::build_router;
use sharehub_api::state::AppState;
use sharehub_auth::jwt::JwtCodec;
use sharehub_auth::password::{PasswordHasher, PasswordValidator};
use sharehub_core::config::AppConfig;
use sharehub_core::error::AppError;
use sharehub_core::traits::blob::BlobStore;
use sharehub_database::DatabasePool;
use sharehub_database::repositories::{PgShareStore, PgUserStore};
use sharehub_entity::store::{ShareStore, UserStore};
use sharehub_service::email::EmailService;
use sharehub_service::share::{AccessService, LinkGenerator, ShareService};
use sharehub_service::stats::StatsService;
use sharehub_service::user::UserService;
use sharehub_storage::PinningClient;

#[tokio::main]
async fn main() {
    let env = std::env::var("SHAREHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FileShare Hub v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = DatabasePool::connect(&config.database).await?;
    sharehub_database::migration::run_migrations(db.pool()).await?;

    // ── Pinning gateway ──────────────────────────────────────────
    let blob_store: Arc<dyn BlobStore> = Arc::new(PinningClient::new(&config.pinning)?);
    tracing::info!("Pinning gateway client initialized");

    // ── Stores ───────────────────────────────────────────────────
    let share_store: Arc<dyn ShareStore> = Arc::new(PgShareStore::new(db.pool().clone()));
    let user_store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(db.pool().clone()));

    // ── Auth ─────────────────────────────────────────────────────
    let hasher = Arc::new(PasswordHasher::new());
    let password_validator = Arc::new(PasswordValidator::new(&config.auth));
    let jwt = Arc::new(JwtCodec::new(&config.auth));

    // ── Services ─────────────────────────────────────────────────
    let links = Arc::new(LinkGenerator::new(
        &config.server.base_url,
        config.upload.download_id_length,
    ));
    let email_service = Arc::new(EmailService::new(&config.email)?);
    let share_service = Arc::new(ShareService::new(
        Arc::clone(&share_store),
        Arc::clone(&hasher),
        Arc::clone(&links),
        config.upload.clone(),
    ));
    let access_service = Arc::new(AccessService::new(
        Arc::clone(&share_store),
        Arc::clone(&hasher),
    ));
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_store),
        Arc::clone(&hasher),
        password_validator,
        Arc::clone(&jwt),
        Arc::clone(&email_service),
        Arc::clone(&links),
        &config.auth,
    ));
    let stats_service = Arc::new(StatsService::new(
        Arc::clone(&share_store),
        Arc::clone(&user_store),
    ));
    tracing::info!("Services initialized");

    // ── Owner bootstrap ──────────────────────────────────────────
    user_service.bootstrap_owner().await?;

    // ── HTTP server ──────────────────────────────────────────────
    let state = AppState {
        config: Arc::new(config.clone()),
        db_pool: db.pool().clone(),
        blob_store,
        jwt,
        share_service,
        access_service,
        user_service,
        stats_service,
        email_service,
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("FileShare Hub listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("FileShare Hub shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
