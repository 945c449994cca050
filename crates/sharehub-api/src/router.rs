//! Route definitions for the FileShare Hub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via axum's
//! `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.upload.max_file_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(share_routes())
        .merge(admin_routes())
        .route("/health", get(handlers::health::health_check));

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        // Leave headroom for the multipart framing around the file part.
        .layer(DefaultBodyLimit::max(max_upload + 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Account endpoints: register, login, me, password reset.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
        .route(
            "/auth/forgot-password",
            post(handlers::auth::forgot_password),
        )
        .route(
            "/auth/verify-reset-token",
            get(handlers::auth::verify_reset_token),
        )
        .route("/auth/reset-password", post(handlers::auth::reset_password))
}

/// Upload, public download, and dashboard file management.
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(handlers::upload::upload_file))
        .route(
            "/download/{download_id}",
            get(handlers::download::download_file),
        )
        .route(
            "/download/{download_id}",
            post(handlers::download::preview_file),
        )
        .route("/files", get(handlers::files::list_files))
        .route(
            "/files/{download_id}",
            patch(handlers::files::update_file),
        )
        .route(
            "/files/{download_id}",
            delete(handlers::files::delete_file),
        )
}

/// Admin-only endpoints.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/stats", get(handlers::admin::stats::dashboard_stats))
        .route("/admin/files", get(handlers::admin::files::list_files))
        .route(
            "/admin/files/{download_id}",
            delete(handlers::admin::files::delete_file),
        )
        .route("/admin/users", get(handlers::admin::users::list_users))
        .route(
            "/admin/users/role",
            post(handlers::admin::users::change_role),
        )
        .route("/admin/test-email", post(handlers::admin::system::test_email))
        .route(
            "/admin/health/database",
            get(handlers::admin::system::health_database),
        )
        .route(
            "/admin/health/ipfs",
            get(handlers::admin::system::health_ipfs),
        )
}

/// Build CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<axum::http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
