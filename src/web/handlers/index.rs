//! Index page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use crate::state::AppState;
use crate::utils::timespan::format_timespan;

/// Template for the index page.
///
/// Renders `templates/index.html` with the shortening form and the link
/// validity period, e.g. `3 days`.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub validity_time: String,
}

/// Renders the index page.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    let delay = state.link_service.policy().expiration_delay;

    IndexTemplate {
        validity_time: format_timespan(u64::try_from(delay).unwrap_or(0)),
    }
}
