//! Top-level router combining pages, API and redirect routes.
//!
//! # Route Structure
//!
//! - `GET  /`                  - Index page
//! - `GET  /robots.txt`        - Crawler rules
//! - `GET  /assets/*`          - Static assets
//! - `GET  /health`            - Health check: database, forbidden list
//! - `POST /api/shortit`       - Create or renew a short link
//! - `/api/admin/*`            - Admin API (Bearer token, only when `ADMIN_TOKEN` is set)
//! - `GET  /{token}`           - Short link redirect
//!
//! Static routes take precedence over `/{token}`, so no token can shadow them.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token on the admin API
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use crate::web;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let mut api_router = api::routes::public_routes();

    if state.admin_token.is_some() {
        let admin_router = api::routes::admin_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
        api_router = api_router.merge(admin_router);
    }

    let router = Router::new()
        .merge(web::routes::public_routes())
        .route("/health", get(health_handler))
        .route("/{token}", get(redirect_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
