//! Account handlers: register, login, me, password reset.

use axum::Json;
use axum::extract::{Query, State};

use sharehub_core::error::AppError;
use sharehub_entity::user::IdentityRef;
use sharehub_service::user::RegisterRequest;

use crate::error::ApiError;
use crate::dto::request::{
    ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, ResetTokenQuery,
};
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<sharehub_entity::user::User>>, ApiError> {
    let user = state.user_service.register(req).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let (user, token, expires_at) = state
        .user_service
        .authenticate(&req.email, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        token,
        expires_at,
        user,
    })))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Result<Json<ApiResponse<IdentityRef>>, ApiError> {
    let identity = auth
        .identity()
        .cloned()
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?;
    Ok(Json(ApiResponse::ok(identity)))
}

/// POST /api/auth/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.user_service.request_password_reset(&req.email).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "If that email is registered, a reset link has been sent",
    ))))
}

/// GET /api/auth/verify-reset-token?token=
pub async fn verify_reset_token(
    State(state): State<AppState>,
    Query(query): Query<ResetTokenQuery>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.user_service.verify_reset_token(&query.token).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Token is valid"))))
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .user_service
        .reset_password(&req.token, &req.password)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password has been reset",
    ))))
}
