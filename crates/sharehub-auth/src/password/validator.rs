//! Account password policy enforcement.

use sharehub_core::config::auth::AuthConfig;
use sharehub_core::error::AppError;

/// Validates account password strength against configured policies.
///
/// Applies only to account passwords; share access passwords are chosen
/// freely by uploaders.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length as usize,
        }
    }

    /// Validates a password against all configured policies.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.len() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if !password.chars().any(|c| c.is_alphabetic()) {
            return Err(AppError::validation(
                "Password must contain at least one letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one digit",
            ));
        }

        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < zxcvbn::Score::Two {
            return Err(AppError::validation(
                "Password is too weak. Please use a less guessable password.",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator { min_length: 6 }
    }

    #[test]
    fn test_rejects_short_passwords() {
        assert!(validator().validate("a1").is_err());
    }

    #[test]
    fn test_requires_letter_and_digit() {
        assert!(validator().validate("123456789").is_err());
        assert!(validator().validate("abcdefghi").is_err());
    }

    #[test]
    fn test_accepts_reasonable_password() {
        assert!(validator().validate("kayak-Trombone-41").is_ok());
    }
}
