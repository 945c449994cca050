//! JWT encoding and decoding with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use sharehub_core::config::auth::AuthConfig;
use sharehub_core::error::AppError;
use sharehub_entity::user::User;

use super::claims::Claims;

/// Creates and validates signed JWT access tokens.
#[derive(Clone)]
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_minutes: i64,
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish_non_exhaustive()
    }
}

impl JwtCodec {
    /// Creates a new codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_minutes: config.token_ttl_minutes as i64,
        }
    }

    /// Issues an access token for the given user.
    pub fn issue(&self, user: &User) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::minutes(self.ttl_minutes);

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok((token, expires_at))
    }

    /// Decodes and validates an access token.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::unauthorized(format!("Invalid access token: {e}")))?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sharehub_entity::user::UserRole;
    use uuid::Uuid;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-key-for-unit-tests".to_string(),
            token_ttl_minutes: 60,
            owner_email: None,
            password_min_length: 6,
            reset_token_ttl_minutes: 60,
        }
    }

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Admin,
            is_owner: false,
            is_active: true,
            reset_token: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    #[test]
    fn test_issue_and_decode_round_trip() {
        let codec = JwtCodec::new(&config());
        let u = user();
        let (token, _expires) = codec.issue(&u).unwrap();

        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.sub, u.id);
        assert_eq!(claims.email, u.email);
        assert_eq!(claims.role, UserRole::Admin);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let codec = JwtCodec::new(&config());
        let (token, _) = codec.issue(&user()).unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(codec.decode(&tampered).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let codec = JwtCodec::new(&config());
        let (token, _) = codec.issue(&user()).unwrap();

        let mut other_config = config();
        other_config.jwt_secret = "a-different-secret".to_string();
        let other = JwtCodec::new(&other_config);
        assert!(other.decode(&token).is_err());
    }
}
