//! Link entity representing a shortened URL mapping.

use serde::Serialize;

use crate::utils::encoding::id_to_token;

/// A persisted short link.
///
/// `endpoint` holds the URL-safe base64 encoding of the original URL and is
/// also the deduplication key. `expiration_date` is an absolute Unix timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub endpoint: String,
    pub expiration_date: i64,
}

impl Link {
    pub fn new(id: i64, endpoint: String, expiration_date: i64) -> Self {
        Self {
            id,
            endpoint,
            expiration_date,
        }
    }

    /// Lowercase hexadecimal rendering of the id, used as the URL path segment.
    pub fn token(&self) -> String {
        id_to_token(self.id)
    }

    /// Returns true once `now` has passed the expiration date.
    ///
    /// Matches the sweep predicate: a link expiring exactly at `now` is still live.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expiration_date < now
    }

    /// Seconds left before expiry, clamped at zero.
    pub fn remaining_seconds(&self, now: i64) -> u64 {
        u64::try_from(self.expiration_date - now).unwrap_or(0)
    }
}

/// Result of a successful shortening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub token: String,
    /// Full short link, `{WEBSITE_URL}/{token}`.
    pub url: String,
}

/// Administrative view of a live link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSummary {
    pub id: i64,
    pub token: String,
    pub url: String,
    pub expiration_date: i64,
    pub remaining: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_token_is_lowercase_hex() {
        let link = Link::new(255, "ZXhhbXBsZS5jb20=".to_string(), 0);
        assert_eq!(link.token(), "ff");

        let link = Link::new(1, "ZXhhbXBsZS5jb20=".to_string(), 0);
        assert_eq!(link.token(), "1");
    }

    #[test]
    fn test_link_is_expired_is_strict() {
        let link = Link::new(1, String::new(), 1_000);

        assert!(!link.is_expired(999));
        assert!(!link.is_expired(1_000));
        assert!(link.is_expired(1_001));
    }

    #[test]
    fn test_remaining_seconds_clamps_at_zero() {
        let link = Link::new(1, String::new(), 1_000);

        assert_eq!(link.remaining_seconds(400), 600);
        assert_eq!(link.remaining_seconds(2_000), 0);
    }
}
