//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use sharehub_core::AppError;

/// Roles a user can hold.
///
/// `Owner` is held by exactly one identity, designated through
/// configuration at bootstrap. It is a sticky upper bound: the role API
/// can neither grant nor revoke it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular account.
    User,
    /// May manage all shares and users.
    Admin,
    /// The single designated owner identity. Same capabilities as admin,
    /// but immune to demotion.
    Owner,
}

impl UserRole {
    /// Whether this role carries administrative capabilities.
    pub fn can_administer(&self) -> bool {
        matches!(self, Self::Admin | Self::Owner)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "owner" => Ok(Self::Owner),
            _ => Err(AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: user, admin, owner"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_administrative_roles() {
        assert!(UserRole::Admin.can_administer());
        assert!(UserRole::Owner.can_administer());
        assert!(!UserRole::User.can_administer());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("OWNER".parse::<UserRole>().unwrap(), UserRole::Owner);
        assert!("superuser".parse::<UserRole>().is_err());
    }
}
