//! Encoding helpers for stored endpoints and short-link tokens.
//!
//! Endpoints are stored as URL-safe base64 (padded) of the original URL's
//! UTF-8 bytes. Tokens are the lowercase hexadecimal rendering of a link id.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;

/// Encodes a URL into its stored endpoint form.
pub fn encode_endpoint(url: &str) -> String {
    URL_SAFE.encode(url.as_bytes())
}

/// Decodes a stored endpoint back into the original URL.
///
/// Returns `None` if the value is not valid base64 or not valid UTF-8.
pub fn decode_endpoint(endpoint: &str) -> Option<String> {
    let bytes = URL_SAFE.decode(endpoint).ok()?;
    String::from_utf8(bytes).ok()
}

/// Renders a link id as a token.
pub fn id_to_token(id: i64) -> String {
    format!("{id:x}")
}

/// Parses a token back into a link id.
///
/// Accepts hexadecimal digits in either case. Returns `None` for empty input,
/// any non-hex character, or a value that does not fit an `i64`.
pub fn token_to_id(token: &str) -> Option<i64> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    i64::from_str_radix(token, 16).ok()
}
