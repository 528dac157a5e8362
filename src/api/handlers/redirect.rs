//! Handler for short link redirects.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use std::net::SocketAddr;
use tracing::{error, info};

use crate::error::ResolveError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;
use crate::web::handlers::LinkAccessErrorTemplate;

/// Redirects a token to its original URL.
///
/// # Endpoint
///
/// `GET /{token}`
///
/// Tokens are hexadecimal and case-insensitive. Expired links are swept
/// before the lookup, so they resolve exactly like links that never existed.
///
/// # Responses
///
/// - **307 Temporary Redirect** to the original URL (`http://` added when it has no scheme)
/// - **400** error page if the token is not hexadecimal
/// - **404** error page if the link expired or never existed
/// - **500** error page on storage failure
pub async fn redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Response {
    match state
        .link_service
        .resolve(&token, Utc::now().timestamp())
        .await
    {
        Ok(url) => {
            let ip = client_ip(&headers, peer, state.behind_proxy);
            info!(client = %ip, token = %token, "Redirected");
            Redirect::temporary(&url).into_response()
        }
        Err(e) => error_page(e).into_response(),
    }
}

fn error_page(e: ResolveError) -> (StatusCode, LinkAccessErrorTemplate) {
    let status = match &e {
        ResolveError::InvalidToken => StatusCode::BAD_REQUEST,
        ResolveError::NotFoundOrExpired => StatusCode::NOT_FOUND,
        ResolveError::Storage(inner) => {
            error!(error = %inner, "Storage failure while resolving link");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let message = match e {
        ResolveError::Storage(_) => "An unexpected error occurred.".to_string(),
        other => other.to_string(),
    };

    (status, LinkAccessErrorTemplate { message })
}
