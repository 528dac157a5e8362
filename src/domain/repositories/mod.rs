//! Repository trait definitions for the domain layer.
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link storage, expiry sweep and counting
//! - [`SettingRepository`] - Key-value settings
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod link_repository;
pub mod setting_repository;

pub use link_repository::LinkRepository;
pub use setting_repository::SettingRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use setting_repository::MockSettingRepository;
