//! Blob store trait for the content-addressed pinning backend.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// Result of pinning a file's bytes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PinOutcome {
    /// Content identifier assigned by the pinning service.
    pub cid: String,
    /// Size of the pinned content in bytes, as reported upstream.
    pub size_bytes: u64,
    /// Public retrieval URL for the pinned content.
    pub gateway_url: String,
}

/// A byte stream type used for reading pinned content.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for the content-addressed blob store.
///
/// Pinned content is treated as append-only: once a CID exists it is
/// never mutated, and deletion of pinned bytes is not part of the
/// contract. The trait is defined here in `sharehub-core` and
/// implemented in `sharehub-storage`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Pin a file's bytes and return its content identifier.
    async fn pin_file(
        &self,
        bytes: Bytes,
        filename: &str,
        content_type: &str,
    ) -> AppResult<PinOutcome>;

    /// Fetch pinned content as a byte stream for download.
    async fn fetch(&self, cid: &str) -> AppResult<ByteStream>;

    /// Check whether the pinning service accepts our credentials.
    async fn test_authentication(&self) -> AppResult<bool>;
}
