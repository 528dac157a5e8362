//! SQLite repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with bound
//! parameters for every query.
//!
//! # Repositories
//!
//! - [`SqliteLinkRepository`] - Link storage, expiry sweep and counting
//! - [`SqliteSettingRepository`] - Key-value settings
//!
//! [`pool`] opens the database file and applies the embedded migrations.

pub mod pool;
pub mod sqlite_link_repository;
pub mod sqlite_setting_repository;

pub use pool::{connect, run_migrations};
pub use sqlite_link_repository::SqliteLinkRepository;
pub use sqlite_setting_repository::SqliteSettingRepository;
