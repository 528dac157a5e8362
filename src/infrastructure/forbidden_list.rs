//! Forbidden websites list fetched from a remote provider.
//!
//! The provider serves a JSON document of the form
//!
//! ```json
//! { "links": ["bad-site.example", "phishing.example/login"] }
//! ```
//!
//! Each entry is matched as a case-sensitive substring of candidate URLs.
//! The current list lives behind an [`ArcSwap`], so readers always see a
//! complete snapshot while a refresh replaces it.

use arc_swap::ArcSwap;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{error, info, warn};

use crate::error::ProviderError;

/// Shape of the provider document.
#[derive(Debug, Deserialize)]
struct ForbiddenListDocument {
    links: Vec<String>,
}

/// In-memory cache of forbidden URL substrings.
pub struct ForbiddenList {
    provider_url: String,
    client: Client,
    entries: ArcSwap<Vec<String>>,
}

impl ForbiddenList {
    /// Creates an empty list bound to `provider_url`.
    ///
    /// Nothing is fetched until [`Self::refresh`] is called.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(provider_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            provider_url: provider_url.into(),
            client,
            entries: ArcSwap::from_pointee(Vec::new()),
        })
    }

    /// Creates a list with fixed entries and no provider.
    ///
    /// Used by tests and tools that do not need the remote list.
    pub fn from_entries(entries: Vec<String>) -> Self {
        Self {
            provider_url: String::new(),
            client: Client::new(),
            entries: ArcSwap::from_pointee(entries),
        }
    }

    /// Number of entries in the current snapshot.
    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.load().is_empty()
    }

    /// Returns `false` if `url` contains any forbidden entry.
    pub fn is_allowed(&self, url: &str) -> bool {
        !self
            .entries
            .load()
            .iter()
            .any(|entry| url.contains(entry.as_str()))
    }

    /// Fetches the provider document and swaps in the new list.
    ///
    /// The previous snapshot is kept when the fetch fails.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Unavailable`] if the request fails or returns a
    ///   non-success status
    /// - [`ProviderError::Corrupted`] if the body is not UTF-8 JSON with a
    ///   `links` array of strings
    pub async fn refresh(&self) -> Result<usize, ProviderError> {
        let response = self
            .client
            .get(&self.provider_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let links = parse_document(&body)?;
        let count = links.len();
        self.entries.store(Arc::new(links));

        info!(entries = count, "Updated forbidden websites list");
        Ok(count)
    }

    /// Like [`Self::refresh`], retrying unavailable providers with exponential
    /// backoff up to `retries` extra attempts. Corrupted documents are not retried.
    pub async fn refresh_with_retry(&self, retries: usize) -> Result<usize, ProviderError> {
        // 500ms, 1s, 2s, ... capped at 10s, each scaled by a random jitter.
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(250)
            .max_delay(Duration::from_secs(10))
            .map(jitter)
            .take(retries);

        RetryIf::start(
            strategy,
            move || async move {
                let result = self.refresh().await;
                if let Err(e) = &result {
                    warn!(kind = e.kind(), error = %e, "Forbidden websites list fetch failed");
                }
                result
            },
            |e: &ProviderError| matches!(e, ProviderError::Unavailable(_)),
        )
        .await
    }

    /// Spawns a task refreshing the list every `interval`.
    ///
    /// Failures are logged and the current snapshot stays in place.
    pub fn spawn_refresher(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; startup already fetched the list.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if let Err(e) = self.refresh().await {
                    error!(
                        kind = e.kind(),
                        error = %e,
                        "Periodic forbidden websites list refresh failed, keeping previous list"
                    );
                }
            }
        })
    }
}

/// Parses a provider document into its list of entries.
fn parse_document(body: &[u8]) -> Result<Vec<String>, ProviderError> {
    let text = std::str::from_utf8(body).map_err(|e| ProviderError::Corrupted(e.to_string()))?;
    let document: ForbiddenListDocument =
        serde_json::from_str(text).map_err(|e| ProviderError::Corrupted(e.to_string()))?;
    Ok(document.links)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(entries: &[&str]) -> ForbiddenList {
        ForbiddenList::from_entries(entries.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_is_allowed_substring_match() {
        let forbidden = list(&["bad.example", "evil"]);

        assert!(forbidden.is_allowed("https://good.example/page"));
        assert!(!forbidden.is_allowed("https://bad.example/page"));
        assert!(!forbidden.is_allowed("https://good.example/?q=evil"));
    }

    #[test]
    fn test_is_allowed_is_case_sensitive() {
        let forbidden = list(&["bad.example"]);
        assert!(forbidden.is_allowed("https://BAD.EXAMPLE/"));
    }

    #[test]
    fn test_empty_list_allows_everything() {
        let forbidden = list(&[]);
        assert!(forbidden.is_empty());
        assert!(forbidden.is_allowed("https://anything.example"));
    }

    #[test]
    fn test_parse_document() {
        let links = parse_document(br#"{"links": ["a.example", "b.example"]}"#).unwrap();
        assert_eq!(links, vec!["a.example", "b.example"]);
    }

    #[test]
    fn test_parse_document_ignores_extra_fields() {
        let links = parse_document(br#"{"links": ["a.example"], "updated": "2024-01-01"}"#).unwrap();
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_parse_document_missing_field() {
        let result = parse_document(br#"{"sites": []}"#);
        assert!(matches!(result, Err(ProviderError::Corrupted(_))));
    }

    #[test]
    fn test_parse_document_invalid_json() {
        let result = parse_document(b"<html>not json</html>");
        assert!(matches!(result, Err(ProviderError::Corrupted(_))));
    }

    #[test]
    fn test_parse_document_invalid_utf8() {
        let result = parse_document(&[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(ProviderError::Corrupted(_))));
    }
}
