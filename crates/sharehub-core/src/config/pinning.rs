//! Pinning gateway (blob store) configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the IPFS pinning gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinningConfig {
    /// Base URL of the pinning HTTP API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Base URL of the public retrieval gateway. Content is fetched from
    /// `{gateway_url}{cid}`.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    /// Bearer token used to authenticate against the pinning API.
    pub jwt_token: String,
    /// Request timeout in seconds for pinning and retrieval calls.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_api_url() -> String {
    "https://api.pinata.cloud".to_string()
}

fn default_gateway_url() -> String {
    "https://gateway.pinata.cloud/ipfs/".to_string()
}

fn default_timeout() -> u64 {
    120
}
