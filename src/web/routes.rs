//! Page and static asset routes.

use crate::state::AppState;
use crate::web::handlers::index_handler;
use axum::{Router, routing::get};
use tower_http::services::{ServeDir, ServeFile};

/// Directory holding `robots.txt` and `assets/`.
pub const FRONTEND_DIR: &str = "frontend";

/// Public pages.
///
/// # Endpoints
///
/// - `GET /` - Index page with the shortening form
/// - `GET /robots.txt` - Crawler rules
/// - `GET /assets/*` - Stylesheets, scripts and images
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route_service(
            "/robots.txt",
            ServeFile::new(format!("{FRONTEND_DIR}/robots.txt")),
        )
        .nest_service("/assets", ServeDir::new(format!("{FRONTEND_DIR}/assets")))
}
