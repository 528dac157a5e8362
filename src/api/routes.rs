//! API route configuration.

use crate::api::handlers::{delete_link_handler, list_links_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public API routes.
///
/// # Endpoints
///
/// - `POST /shortit` - Create or renew a short link
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/shortit", post(shorten_handler))
}

/// Admin routes. Callers must wrap them in [`crate::api::middleware::auth`].
///
/// # Endpoints
///
/// - `GET    /admin/links` - List live links
/// - `DELETE /admin/links` - Delete a link by id
pub fn admin_routes() -> Router<AppState> {
    Router::new().route(
        "/admin/links",
        get(list_links_handler).delete(delete_link_handler),
    )
}
