//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - A persisted short link (id, encoded endpoint, expiration)
//! - [`LinkSummary`] - Administrative view of a link with its remaining lifetime
//! - [`ShortLink`] - The outcome of a successful shortening
//! - [`Setting`] - A key-value setting row

pub mod link;
pub mod setting;

pub use link::{Link, LinkSummary, ShortLink};
pub use setting::Setting;
