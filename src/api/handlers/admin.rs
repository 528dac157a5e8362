//! Handlers for the admin link management endpoints.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;

use crate::api::dto::admin::{DeleteLinkRequest, LinkListResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists every live link.
///
/// # Endpoint
///
/// `GET /api/admin/links`
///
/// # Response
///
/// ```json
/// {
///   "links": [
///     {
///       "id": 26,
///       "token": "1a",
///       "url": "example.com/page",
///       "expiration_date": 1700259200,
///       "remaining": "2 days, 23 hours and 59 minutes"
///     }
///   ]
/// }
/// ```
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state
        .link_service
        .list_links(Utc::now().timestamp())
        .await?;

    Ok(Json(LinkListResponse { links }))
}

/// Deletes a link by id, regardless of its expiration.
///
/// # Endpoint
///
/// `DELETE /api/admin/links` with body `{"id": 26}`
///
/// Returns **204 No Content** whether or not the link existed.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<DeleteLinkRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;

    state.link_service.delete(request.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
