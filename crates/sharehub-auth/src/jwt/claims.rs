//! JWT claims embedded in access tokens.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sharehub_entity::user::{IdentityRef, UserRole};

/// Claims payload embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID.
    pub sub: Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// User role at the time of token issuance.
    pub role: UserRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Convert the claims into the identity they assert.
    pub fn identity(&self) -> IdentityRef {
        IdentityRef {
            id: self.sub,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}
