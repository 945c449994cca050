//! # sharehub-storage
//!
//! HTTP client for the IPFS pinning gateway (the blob store behind every
//! share). Implements the [`BlobStore`] trait from `sharehub-core`.
//!
//! [`BlobStore`]: sharehub_core::traits::blob::BlobStore

pub mod client;

pub use client::PinningClient;
