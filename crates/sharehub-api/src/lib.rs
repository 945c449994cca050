//! # sharehub-api
//!
//! HTTP API for FileShare Hub: the axum router, shared application
//! state, request extractors, handlers, and the `AppError` → HTTP
//! response mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;
