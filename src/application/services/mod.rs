//! Business logic services for the application layer.

pub mod link_service;
pub mod rate_limiter;
pub mod url_validator;

pub use link_service::{LinkPolicy, LinkService};
pub use rate_limiter::RateLimiter;
pub use url_validator::UrlValidator;
