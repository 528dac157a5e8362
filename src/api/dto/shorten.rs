//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Request to shorten a single URL.
///
/// `url` is kept as a raw JSON value so that a present-but-mistyped field can
/// be told apart from a missing one. An explicit `null` counts as present.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    #[serde(default, deserialize_with = "present")]
    pub url: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_url_is_present() {
        let request: ShortenRequest = serde_json::from_str(r#"{"url": null}"#).unwrap();
        assert_eq!(request.url, Some(Value::Null));
    }

    #[test]
    fn test_missing_url_is_none() {
        let request: ShortenRequest = serde_json::from_str(r#"{"link": "a.example"}"#).unwrap();
        assert_eq!(request.url, None);
    }
}
