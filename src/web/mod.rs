//! Browser-facing pages and static files.
//!
//! Pages are rendered server-side with Askama templates from `templates/`.
//! Static files are served from `frontend/`.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page and asset routes

pub mod handlers;
pub mod routes;
