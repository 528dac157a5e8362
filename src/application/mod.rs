//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, resolution and expiry
//! - [`services::rate_limiter::RateLimiter`] - Per-client hourly limits and bans
//! - [`services::url_validator::UrlValidator`] - Length, shape and forbidden-list checks

pub mod services;
