//! Candidate URL checks run before a link is created.

use regex::Regex;
use std::sync::{Arc, LazyLock};

use crate::error::ValidationError;
use crate::infrastructure::forbidden_list::ForbiddenList;

/// URLs must be strictly shorter than this many bytes.
pub const MAX_URL_LENGTH: usize = 1024;

/// Loose URL shape: optional scheme, a domain-like run, a 2-6 letter TLD, then
/// path/query characters. Anchored at the start only, so anything may follow
/// a matching prefix.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[()?:/.a-zA-Z0-9@%_+~#=-]{2,256}\.[a-z]{2,6}\b[-a-zA-Z0-9@:%_+.~#?&/=]*")
        .expect("URL regex is valid")
});

/// Returns true if `url` looks like a URL.
///
/// This is deliberately approximate: `example.com/page` and
/// `https://www.example.com` pass, `not a url` does not.
pub fn is_well_formed(url: &str) -> bool {
    URL_REGEX.is_match(url)
}

/// Returns true if `url` is shorter than [`MAX_URL_LENGTH`] bytes.
pub fn is_within_length(url: &str) -> bool {
    url.len() < MAX_URL_LENGTH
}

/// Validates candidate URLs against length, shape and the forbidden list.
#[derive(Clone)]
pub struct UrlValidator {
    forbidden_list: Arc<ForbiddenList>,
}

impl UrlValidator {
    pub fn new(forbidden_list: Arc<ForbiddenList>) -> Self {
        Self { forbidden_list }
    }

    /// Runs every check, in order: length, shape, forbidden list.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::TooLong`] for URLs of 1024 bytes or more
    /// - [`ValidationError::MalformedUrl`] if the URL does not look like one
    /// - [`ValidationError::Forbidden`] if it contains a forbidden entry
    pub fn validate(&self, url: &str) -> Result<(), ValidationError> {
        if !is_within_length(url) {
            return Err(ValidationError::TooLong);
        }

        if !is_well_formed(url) {
            return Err(ValidationError::MalformedUrl);
        }

        if !self.forbidden_list.is_allowed(url) {
            return Err(ValidationError::Forbidden);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(entries: &[&str]) -> UrlValidator {
        UrlValidator::new(Arc::new(ForbiddenList::from_entries(
            entries.iter().map(|s| s.to_string()).collect(),
        )))
    }

    #[test]
    fn test_well_formed_urls() {
        for url in [
            "example.com",
            "example.com/page",
            "http://example.com",
            "https://www.example.com/path?q=rust&lang=en",
            "https://sub.domain.example.org/a/b#frag",
            "user@example.com",
            "https://example.com:8080/path",
        ] {
            assert!(is_well_formed(url), "{url} should be well formed");
        }
    }

    #[test]
    fn test_malformed_urls() {
        for url in ["", "not a url", "localhost", "http://", "a.b", "example.c0m"] {
            assert!(!is_well_formed(url), "{url} should be malformed");
        }
    }

    #[test]
    fn test_prefix_match_is_enough() {
        // Only the beginning has to look like a URL.
        assert!(is_well_formed("example.com/some path with spaces"));
    }

    #[test]
    fn test_length_boundary() {
        let base = "https://example.com/";
        let just_under = format!("{base}{}", "a".repeat(MAX_URL_LENGTH - 1 - base.len()));
        let at_limit = format!("{base}{}", "a".repeat(MAX_URL_LENGTH - base.len()));

        assert!(is_within_length(&just_under));
        assert!(!is_within_length(&at_limit));
    }

    #[test]
    fn test_length_counts_utf8_bytes() {
        let url = format!("example.com/{}", "é".repeat(510));
        assert!(url.chars().count() < MAX_URL_LENGTH);
        assert!(!is_within_length(&url));
    }

    #[test]
    fn test_validate_order() {
        let validator = validator(&["bad"]);
        let long_bad = format!("bad{}", "a".repeat(MAX_URL_LENGTH));

        assert_eq!(validator.validate(&long_bad), Err(ValidationError::TooLong));
        assert_eq!(validator.validate("bad"), Err(ValidationError::MalformedUrl));
        assert_eq!(
            validator.validate("https://bad.example.com"),
            Err(ValidationError::Forbidden)
        );
        assert_eq!(validator.validate("https://good.example.com"), Ok(()));
    }
}
