//! Traits for external collaborators implemented in infrastructure crates.

pub mod blob;
