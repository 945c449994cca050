//! Pinata-compatible pinning gateway client.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info, warn};

use sharehub_core::config::pinning::PinningConfig;
use sharehub_core::error::AppError;
use sharehub_core::result::AppResult;
use sharehub_core::traits::blob::{BlobStore, ByteStream, PinOutcome};

/// HTTP client for a Pinata-shaped pinning API.
///
/// Uploads pin file bytes through `pinFileToIPFS`; downloads stream
/// straight from the public gateway. The client never retries; retry
/// policy belongs to callers, which can consult
/// [`AppError::is_retryable`] on the categorized failure.
#[derive(Debug, Clone)]
pub struct PinningClient {
    http: reqwest::Client,
    api_url: String,
    gateway_url: String,
    jwt_token: String,
}

/// Response body of a successful pin request.
#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
    #[serde(rename = "PinSize")]
    pin_size: u64,
}

impl PinningClient {
    /// Create a new client from pinning configuration.
    pub fn new(config: &PinningConfig) -> AppResult<Self> {
        if config.jwt_token.is_empty() {
            return Err(AppError::configuration("Pinning JWT token not configured"));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            gateway_url: config.gateway_url.clone(),
            jwt_token: config.jwt_token.clone(),
        })
    }

    /// Build the public retrieval URL for a content identifier.
    pub fn gateway_url_for(&self, cid: &str) -> String {
        if self.gateway_url.ends_with('/') {
            format!("{}{cid}", self.gateway_url)
        } else {
            format!("{}/{cid}", self.gateway_url)
        }
    }

    /// Categorize an upstream HTTP status per the gateway error contract.
    fn categorize_status(status: StatusCode, body: &str) -> AppError {
        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                AppError::rate_limited("Pinning service rate limit exceeded")
            }
            StatusCode::PAYLOAD_TOO_LARGE => {
                AppError::quota_exceeded("File too large for pinning service")
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                AppError::unauthorized("Pinning service authentication failed")
            }
            _ => AppError::blob_store(format!(
                "Pinning service request failed: {status} - {body}"
            )),
        }
    }
}

#[async_trait]
impl BlobStore for PinningClient {
    async fn pin_file(
        &self,
        bytes: Bytes,
        filename: &str,
        content_type: &str,
    ) -> AppResult<PinOutcome> {
        let metadata = serde_json::json!({
            "name": filename,
            "keyvalues": { "originalName": filename },
        });
        let options = serde_json::json!({ "cidVersion": 1 });

        let part = Part::stream(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| AppError::validation(format!("Invalid content type: {e}")))?;

        let form = Form::new()
            .part("file", part)
            .text("pinataMetadata", metadata.to_string())
            .text("pinataOptions", options.to_string());

        debug!(filename, content_type, "Pinning file");

        let response = self
            .http
            .post(format!("{}/pinning/pinFileToIPFS", self.api_url))
            .bearer_auth(&self.jwt_token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::blob_store(format!("Pinning request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Pin upload rejected");
            return Err(Self::categorize_status(status, &body));
        }

        let pin: PinResponse = response
            .json()
            .await
            .map_err(|e| AppError::blob_store(format!("Invalid pinning response: {e}")))?;

        info!(cid = %pin.ipfs_hash, size = pin.pin_size, "File pinned");

        let gateway_url = self.gateway_url_for(&pin.ipfs_hash);
        Ok(PinOutcome {
            cid: pin.ipfs_hash,
            size_bytes: pin.pin_size,
            gateway_url,
        })
    }

    async fn fetch(&self, cid: &str) -> AppResult<ByteStream> {
        let url = self.gateway_url_for(cid);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::blob_store(format!("Gateway fetch failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::NOT_FOUND {
                return Err(AppError::not_found("Content not found in storage"));
            }
            return Err(Self::categorize_status(status, ""));
        }

        let stream = response.bytes_stream().map_err(std::io::Error::other);
        Ok(Box::pin(stream))
    }

    async fn test_authentication(&self) -> AppResult<bool> {
        let response = self
            .http
            .get(format!("{}/data/testAuthentication", self.api_url))
            .bearer_auth(&self.jwt_token)
            .send()
            .await
            .map_err(|e| AppError::blob_store(format!("Authentication test failed: {e}")))?;

        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharehub_core::error::ErrorKind;

    fn client() -> PinningClient {
        PinningClient::new(&PinningConfig {
            api_url: "https://api.pinata.cloud".to_string(),
            gateway_url: "https://gateway.pinata.cloud/ipfs/".to_string(),
            jwt_token: "test-token".to_string(),
            request_timeout_seconds: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let result = PinningClient::new(&PinningConfig {
            api_url: "https://api.pinata.cloud".to_string(),
            gateway_url: "https://gateway.pinata.cloud/ipfs/".to_string(),
            jwt_token: String::new(),
            request_timeout_seconds: 5,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_gateway_url_join() {
        let c = client();
        assert_eq!(
            c.gateway_url_for("bafyexample"),
            "https://gateway.pinata.cloud/ipfs/bafyexample"
        );
    }

    #[test]
    fn test_status_categorization() {
        let rate = PinningClient::categorize_status(StatusCode::TOO_MANY_REQUESTS, "");
        assert_eq!(rate.kind, ErrorKind::RateLimited);
        assert!(rate.is_retryable());

        let auth = PinningClient::categorize_status(StatusCode::FORBIDDEN, "");
        assert_eq!(auth.kind, ErrorKind::Authentication);
        assert!(!auth.is_retryable());

        let size = PinningClient::categorize_status(StatusCode::PAYLOAD_TOO_LARGE, "");
        assert_eq!(size.kind, ErrorKind::QuotaExceeded);

        let other = PinningClient::categorize_status(StatusCode::BAD_GATEWAY, "upstream");
        assert_eq!(other.kind, ErrorKind::BlobStore);
        assert!(!other.is_retryable());
    }
}
