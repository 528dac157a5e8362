//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`persistence`] - SQLite repository implementations
//! - [`forbidden_list`] - Remote forbidden websites list with an in-memory snapshot

pub mod forbidden_list;
pub mod persistence;
