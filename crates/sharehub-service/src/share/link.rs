//! Download token generation and link construction.

use rand::Rng;

/// URL-safe alphabet used for download tokens.
const DOWNLOAD_ID_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Generates download tokens and builds public download links.
#[derive(Debug, Clone)]
pub struct LinkGenerator {
    base_url: String,
    id_length: usize,
}

impl LinkGenerator {
    /// Creates a new generator.
    pub fn new(base_url: &str, id_length: usize) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            id_length: id_length.max(8),
        }
    }

    /// Generates a cryptographically random URL-safe download token.
    ///
    /// Uniqueness is enforced by the caller against the store; this only
    /// guarantees the alphabet and length.
    pub fn generate_download_id(&self) -> String {
        let mut rng = rand::rng();
        (0..self.id_length)
            .map(|_| {
                let idx = rng.random_range(0..DOWNLOAD_ID_ALPHABET.len());
                DOWNLOAD_ID_ALPHABET[idx] as char
            })
            .collect()
    }

    /// Builds the public download URL for a token.
    pub fn download_url(&self, download_id: &str) -> String {
        format!("{}/download/{download_id}", self.base_url)
    }

    /// Builds the password reset URL for a reset token.
    pub fn reset_password_url(&self, reset_token: &str) -> String {
        format!("{}/auth/reset-password?token={reset_token}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_length_and_alphabet() {
        let links = LinkGenerator::new("https://share.example.com", 8);
        let id = links.generate_download_id();
        assert_eq!(id.len(), 8);
        assert!(
            id.bytes().all(|b| DOWNLOAD_ID_ALPHABET.contains(&b)),
            "unexpected character in {id}"
        );
    }

    #[test]
    fn test_minimum_length_is_enforced() {
        let links = LinkGenerator::new("https://share.example.com", 4);
        assert_eq!(links.generate_download_id().len(), 8);
    }

    #[test]
    fn test_tokens_are_distinct() {
        let links = LinkGenerator::new("https://share.example.com", 8);
        let ids: HashSet<String> = (0..1000).map(|_| links.generate_download_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_download_url() {
        let links = LinkGenerator::new("https://share.example.com/", 8);
        assert_eq!(
            links.download_url("a1B2c3D4"),
            "https://share.example.com/download/a1B2c3D4"
        );
    }
}
