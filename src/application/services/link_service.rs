//! Link lifecycle: shortening, resolution, expiry and administration.

use std::net::IpAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::application::services::rate_limiter::RateLimiter;
use crate::application::services::url_validator::UrlValidator;
use crate::domain::entities::{LinkSummary, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{ResolveError, ShortenError, StoreError};
use crate::utils::encoding::{decode_endpoint, encode_endpoint, id_to_token, token_to_id};
use crate::utils::timespan::format_timespan;

/// Tunables of the link lifecycle.
#[derive(Debug, Clone)]
pub struct LinkPolicy {
    /// Seconds a link stays valid after creation or renewal.
    pub expiration_delay: i64,
    /// New links are refused once the store holds more than this many.
    pub max_link_amount: i64,
    /// Base of every short link, e.g. `https://s.example.com`.
    pub website_url: String,
}

/// Service orchestrating admission, validation and storage of links.
///
/// # Concurrency
///
/// Every sequence that sweeps and then reads or writes the store runs under a
/// single writer lock, so two requests for the same new URL can never both
/// insert it, and a sweep never interleaves with a renewal.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    rate_limiter: Arc<RateLimiter>,
    validator: UrlValidator,
    policy: LinkPolicy,
    write_lock: Mutex<()>,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    pub fn new(
        link_repository: Arc<L>,
        rate_limiter: Arc<RateLimiter>,
        validator: UrlValidator,
        policy: LinkPolicy,
    ) -> Self {
        Self {
            link_repository,
            rate_limiter,
            validator,
            policy,
            write_lock: Mutex::new(()),
        }
    }

    pub fn policy(&self) -> &LinkPolicy {
        &self.policy
    }

    /// Shortens `url` on behalf of `client_ip` at time `now` (Unix seconds).
    ///
    /// # Flow
    ///
    /// 1. Rate limiter admission for `client_ip`
    /// 2. Sweep of expired links
    /// 3. URL validation (length, shape, forbidden list)
    /// 4. If the URL is already stored, its expiration is renewed and the
    ///    existing link returned
    /// 5. Otherwise, if the store is over capacity the request is refused,
    ///    else a new link is inserted
    ///
    /// Renewing an existing link is allowed even when the store is over
    /// capacity, since it does not add a row.
    ///
    /// # Errors
    ///
    /// - [`ShortenError::RateLimited`] if the client is over its hourly limit or banned
    /// - [`ShortenError::Validation`] if the URL is refused
    /// - [`ShortenError::CapacityExceeded`] if a new link would exceed `max_link_amount`
    /// - [`ShortenError::Storage`] on database errors
    pub async fn shorten(
        &self,
        url: &str,
        client_ip: IpAddr,
        now: i64,
    ) -> Result<ShortLink, ShortenError> {
        if !self.rate_limiter.admit(client_ip, now) {
            info!(%client_ip, "Link creation refused by rate limiter");
            return Err(ShortenError::RateLimited);
        }

        let _guard = self.write_lock.lock().await;
        self.sweep(now).await?;

        self.validator.validate(url)?;

        let endpoint = encode_endpoint(url);
        let expiration_date = now.saturating_add(self.policy.expiration_delay);

        if let Some(id) = self.link_repository.find_by_endpoint(&endpoint).await? {
            self.link_repository.renew(id, expiration_date).await?;
            info!(id, expiration_date, "Renewed expiration date");
            return Ok(self.short_link(id));
        }

        let count = self.link_repository.count().await?;
        if count > self.policy.max_link_amount {
            warn!(
                count,
                max = self.policy.max_link_amount,
                "Link capacity exceeded, refusing new link"
            );
            return Err(ShortenError::CapacityExceeded);
        }

        let id = self
            .link_repository
            .insert(&endpoint, expiration_date)
            .await?;
        info!(id, url, "Created new link");

        Ok(self.short_link(id))
    }

    /// Resolves a token to the URL it redirects to.
    ///
    /// Scheme-less URLs are returned with an `http://` prefix.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::InvalidToken`] if the token is not hexadecimal
    /// - [`ResolveError::NotFoundOrExpired`] if no live link has that id
    /// - [`ResolveError::Storage`] on database errors or an undecodable row
    pub async fn resolve(&self, token: &str, now: i64) -> Result<String, ResolveError> {
        let _guard = self.write_lock.lock().await;
        self.sweep(now).await?;

        let id = token_to_id(token).ok_or(ResolveError::InvalidToken)?;

        let endpoint = self
            .link_repository
            .find_by_id(id)
            .await?
            .ok_or(ResolveError::NotFoundOrExpired)?;

        let url = decode_endpoint(&endpoint).ok_or(StoreError::CorruptedEndpoint { id })?;

        Ok(with_default_scheme(url))
    }

    /// Lists every live link with its remaining lifetime.
    pub async fn list_links(&self, now: i64) -> Result<Vec<LinkSummary>, StoreError> {
        let _guard = self.write_lock.lock().await;
        self.sweep(now).await?;

        let links = self.link_repository.list().await?;

        Ok(links
            .into_iter()
            .map(|link| {
                let url = decode_endpoint(&link.endpoint).unwrap_or_else(|| {
                    warn!(id = link.id, "Stored endpoint cannot be decoded");
                    link.endpoint.clone()
                });

                LinkSummary {
                    id: link.id,
                    token: link.token(),
                    url,
                    expiration_date: link.expiration_date,
                    remaining: format_timespan(link.remaining_seconds(now)),
                }
            })
            .collect())
    }

    /// Deletes a link regardless of its expiration. Deleting a missing id is a no-op.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let deleted = self.link_repository.delete_by_id(id).await?;

        if deleted {
            info!(id, "Deleted link");
        } else {
            debug!(id, "Delete requested for unknown link");
        }

        Ok(deleted)
    }

    /// Counts live links.
    pub async fn count_links(&self, now: i64) -> Result<i64, StoreError> {
        let _guard = self.write_lock.lock().await;
        self.sweep(now).await?;
        self.link_repository.count().await
    }

    /// Builds the public short link for `id`.
    pub fn short_link(&self, id: i64) -> ShortLink {
        let token = id_to_token(id);
        let url = format!("{}/{}", self.policy.website_url.trim_end_matches('/'), token);
        ShortLink { id, token, url }
    }

    /// Must be called with the writer lock held.
    async fn sweep(&self, now: i64) -> Result<(), StoreError> {
        let removed = self.link_repository.sweep_expired(now).await?;
        if removed > 0 {
            info!(removed, "Deleted expired links");
        }
        Ok(())
    }
}

fn with_default_scheme(url: String) -> String {
    if url.starts_with("http") {
        url
    } else {
        format!("http://{url}")
    }
}
