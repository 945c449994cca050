//! Bearer-token extractors building the service `RequestContext`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use sharehub_core::error::AppError;
use sharehub_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extractor requiring a valid access token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

/// Extractor that accepts anonymous requests.
///
/// Used by the upload and download surfaces, where authentication is
/// optional; an invalid token is still rejected rather than silently
/// downgraded.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::Deref for MaybeAuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn request_origin(parts: &Parts) -> (String, Option<String>) {
    let ip_address = parts
        .headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .unwrap_or("127.0.0.1")
        .trim()
        .to_string();

    let user_agent = parts
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    (ip_address, user_agent)
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let claims = state.jwt.decode(token)?;
        let (ip_address, user_agent) = request_origin(parts);

        Ok(AuthUser(RequestContext::authenticated(
            claims.identity(),
            ip_address,
            user_agent,
        )))
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let (ip_address, user_agent) = request_origin(parts);

        let ctx = match bearer_token(parts) {
            Some(token) => {
                let claims = state.jwt.decode(token)?;
                RequestContext::authenticated(claims.identity(), ip_address, user_agent)
            }
            None => RequestContext::anonymous(ip_address, user_agent),
        };

        Ok(MaybeAuthUser(ctx))
    }
}
