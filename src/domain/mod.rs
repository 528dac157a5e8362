//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits are implemented in
//! [`crate::infrastructure::persistence`] and orchestrated by
//! [`crate::application::services`].

pub mod entities;
pub mod repositories;
