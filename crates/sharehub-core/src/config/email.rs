//! Email (SMTP) configuration.

use serde::{Deserialize, Serialize};

/// SMTP transport settings for outbound notification email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Whether outbound email is enabled. When disabled, send operations
    /// log and succeed without contacting a server.
    #[serde(default)]
    pub enabled: bool,
    /// SMTP server hostname.
    #[serde(default)]
    pub host: String,
    /// SMTP server port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// SMTP username.
    #[serde(default)]
    pub username: String,
    /// SMTP password.
    #[serde(default)]
    pub password: String,
    /// From address for all outbound mail.
    #[serde(default)]
    pub from_address: String,
    /// Display name used in the From header.
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: String::new(),
            port: default_port(),
            username: String::new(),
            password: String::new(),
            from_address: String::new(),
            from_name: default_from_name(),
        }
    }
}

fn default_port() -> u16 {
    587
}

fn default_from_name() -> String {
    "FileShare Hub".to_string()
}
