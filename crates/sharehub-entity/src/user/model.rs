//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address (unique, lowercase).
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
    /// Whether this is the designated owner identity (set at bootstrap
    /// from configuration, never through the role API).
    pub is_owner: bool,
    /// Whether the account is active.
    pub is_active: bool,
    /// Outstanding password reset token, if one was requested.
    #[serde(skip_serializing)]
    pub reset_token: Option<String>,
    /// Expiry of the outstanding reset token.
    #[serde(skip_serializing)]
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
}

/// The projection of a user consumed by request handling and
/// authorization: who is acting, and with which role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRef {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role at the time the identity was established.
    pub role: UserRole,
}

impl From<&User> for IdentityRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

impl User {
    /// Whether this user has administrative capabilities.
    pub fn is_admin(&self) -> bool {
        self.role.can_administer()
    }

    /// Whether the outstanding reset token is still usable.
    pub fn reset_token_valid(&self) -> bool {
        match (&self.reset_token, self.reset_token_expires_at) {
            (Some(_), Some(expires)) => Utc::now() < expires,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: UserRole::User,
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
    fn test_reset_token_validity() {
        let mut u = user();
        assert!(!u.reset_token_valid());

        u.reset_token = Some("token".to_string());
        u.reset_token_expires_at = Some(Utc::now() + Duration::hours(1));
        assert!(u.reset_token_valid());

        u.reset_token_expires_at = Some(Utc::now() - Duration::minutes(1));
        assert!(!u.reset_token_valid());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_value(user()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("email").is_some());
    }
}
