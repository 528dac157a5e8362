//! Bearer token authentication for the admin API.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use tracing::warn;

use crate::{error::AppError, state::AppState};

/// Authenticates requests against the configured `ADMIN_TOKEN`.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing, malformed, or carries
/// a different token. Returns `404 Not Found` if no admin token is configured,
/// which only happens when the layer is mounted by hand.
///
/// # Example
///
/// ```rust,ignore
/// let admin = api::routes::admin_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = st.admin_token.as_deref() else {
        return Err(AppError::not_found("Not found"));
    };

    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| AppError::unauthorized("Authorization header is missing or invalid"))?;

    if !tokens_match(token.as_bytes(), expected.as_bytes()) {
        warn!(path = %parts.uri.path(), "Rejected admin request with invalid token");
        return Err(AppError::unauthorized("Invalid token"));
    }

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Compares two tokens without short-circuiting on the first differing byte.
fn tokens_match(given: &[u8], expected: &[u8]) -> bool {
    if given.len() != expected.len() {
        return false;
    }

    given
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_match() {
        assert!(tokens_match(b"secret", b"secret"));
        assert!(!tokens_match(b"secret", b"secreT"));
        assert!(!tokens_match(b"secret", b"secret2"));
        assert!(!tokens_match(b"", b"secret"));
    }
}
