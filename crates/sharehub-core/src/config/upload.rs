//! Upload policy configuration.

use serde::{Deserialize, Serialize};

/// Policy limits applied when a share is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum upload size in bytes (default 50 MB).
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,
    /// MIME type allow-list. Entries ending in `/*` match any subtype
    /// of the given top-level type.
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
    /// Length of generated download identifiers.
    #[serde(default = "default_download_id_length")]
    pub download_id_length: usize,
}

impl UploadConfig {
    /// Check a MIME type against the allow-list, honoring `prefix/*`
    /// wildcard entries.
    pub fn allows_mime_type(&self, mime_type: &str) -> bool {
        self.allowed_mime_types.iter().any(|allowed| {
            if let Some(prefix) = allowed.strip_suffix("/*") {
                mime_type
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
            } else {
                allowed == mime_type
            }
        })
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size(),
            allowed_mime_types: default_allowed_mime_types(),
            download_id_length: default_download_id_length(),
        }
    }
}

fn default_max_file_size() -> u64 {
    52_428_800 // 50 MB
}

fn default_allowed_mime_types() -> Vec<String> {
    vec![
        "image/*".to_string(),
        "application/pdf".to_string(),
        "text/*".to_string(),
        "application/msword".to_string(),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document".to_string(),
    ]
}

fn default_download_id_length() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_matches_subtypes() {
        let config = UploadConfig::default();
        assert!(config.allows_mime_type("image/png"));
        assert!(config.allows_mime_type("image/svg+xml"));
        assert!(config.allows_mime_type("text/plain"));
    }

    #[test]
    fn test_exact_entries_do_not_prefix_match() {
        let config = UploadConfig::default();
        assert!(config.allows_mime_type("application/pdf"));
        assert!(!config.allows_mime_type("application/pdf-extra"));
        assert!(!config.allows_mime_type("application/zip"));
    }

    #[test]
    fn test_wildcard_requires_slash_boundary() {
        let config = UploadConfig {
            allowed_mime_types: vec!["image/*".to_string()],
            ..UploadConfig::default()
        };
        assert!(!config.allows_mime_type("imagefoo/png"));
        assert!(!config.allows_mime_type("image"));
    }
}
