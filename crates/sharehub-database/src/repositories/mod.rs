//! Concrete PostgreSQL store implementations.

pub mod share;
pub mod user;

pub use share::PgShareStore;
pub use user::PgUserStore;
