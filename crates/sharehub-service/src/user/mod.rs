//! Account and role management services.

pub mod service;

pub use service::{RegisterRequest, RoleAction, UserService};
