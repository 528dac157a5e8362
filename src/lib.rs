//! # Very Short Link
//!
//! A small self-hosted URL shortener with expiring links, built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities and repository traits
//! - **Application Layer** ([`application`]) - Link lifecycle, rate limiting and validation
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence and the forbidden websites list
//! - **API Layer** ([`api`]) - JSON endpoints, DTOs and middleware
//! - **Web Layer** ([`web`]) - Index and error pages, static files
//!
//! ## Link lifecycle
//!
//! Links get sequential integer ids, exposed as lowercase hexadecimal tokens
//! (`26` → `/1a`). Shortening a URL that is already stored renews its
//! expiration instead of creating a second link. Expired links are swept
//! before every read or write, so they behave exactly like links that never
//! existed.
//!
//! Link creation is limited per client IP: `MAX_LINK_PER_HOUR` links per
//! hourly window, after which the client is banned for `BAN_TIME` seconds.
//!
//! ## Quick Start
//!
//! ```bash
//! export WEBSITE_URL="https://s.example.com"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkPolicy, LinkService, RateLimiter, UrlValidator};
    pub use crate::domain::entities::{Link, LinkSummary, ShortLink};
    pub use crate::error::{AppError, ResolveError, ShortenError};
    pub use crate::infrastructure::forbidden_list::ForbiddenList;
    pub use crate::state::AppState;
}
