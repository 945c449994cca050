//! Share record entity.

pub mod model;

pub use model::{CreateShareRecord, ShareRecord};
