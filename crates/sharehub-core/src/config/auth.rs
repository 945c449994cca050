//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and authorization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign JWT access tokens.
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Email address of the single designated owner identity.
    ///
    /// The matching user row is flagged as owner at startup (or at
    /// registration if it registers later). The owner role can never be
    /// granted or revoked through the role API.
    #[serde(default)]
    pub owner_email: Option<String>,
    /// Minimum account password length.
    #[serde(default = "default_password_min_length")]
    pub password_min_length: u32,
    /// Password reset token TTL in minutes.
    #[serde(default = "default_reset_token_ttl")]
    pub reset_token_ttl_minutes: u64,
}

fn default_token_ttl() -> u64 {
    24 * 60
}

fn default_password_min_length() -> u32 {
    6
}

fn default_reset_token_ttl() -> u64 {
    60
}
