//! JWT access token issuance and validation.

pub mod claims;
pub mod codec;

pub use claims::Claims;
pub use codec::JwtCodec;
