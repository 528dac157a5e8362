//! Data Transfer Objects for API requests and responses.

pub mod admin;
pub mod health;
pub mod shorten;
