//! Share lifecycle services.

pub mod access;
pub mod link;
pub mod service;

pub use access::{AccessService, BlobLocator};
pub use link::LinkGenerator;
pub use service::ShareService;
