//! Handler for the link shortening endpoint.

use axum::{
    Json,
    extract::{ConnectInfo, State, rejection::JsonRejection},
    http::HeaderMap,
};
use chrono::Utc;
use serde_json::Value;
use std::net::SocketAddr;
use tracing::debug;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::{AppError, ShortenError};
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Creates (or renews) a short link for a URL.
///
/// # Endpoint
///
/// `POST /api/shortit`
///
/// # Request Body
///
/// ```json
/// { "url": "example.com/page" }
/// ```
///
/// # Response
///
/// ```json
/// { "short_link": "https://s.example.com/1a" }
/// ```
///
/// # Errors
///
/// Every error is returned as `{"error": "...", "code": "..."}`:
/// - **400**: body is not JSON, `url` is missing or not a string, or the URL is refused
/// - **429**: the client exceeded its hourly limit or is banned
/// - **503**: the store is full
/// - **500**: storage failure
pub async fn shorten_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let url = requested_url(payload)?;
    let ip = client_ip(&headers, peer, state.behind_proxy);

    let link = state
        .link_service
        .shorten(&url, ip, Utc::now().timestamp())
        .await?;

    Ok(Json(ShortenResponse {
        short_link: link.url,
    }))
}

fn requested_url(payload: Result<Json<ShortenRequest>, JsonRejection>) -> Result<String, ShortenError> {
    let Json(request) = payload.map_err(|e| {
        debug!(error = %e, "Rejected shorten request body");
        ShortenError::InvalidBody("Invalid request body.".to_string())
    })?;

    match request.url {
        Some(Value::String(url)) => Ok(url),
        Some(_) => Err(ShortenError::InvalidBody(
            "Wrong data type for URL.".to_string(),
        )),
        None => Err(ShortenError::InvalidBody(
            "Invalid request body.".to_string(),
        )),
    }
}
