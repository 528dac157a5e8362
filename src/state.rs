//! Shared application state injected into every handler.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::services::{LinkPolicy, LinkService, RateLimiter, UrlValidator};
use crate::config::Config;
use crate::infrastructure::forbidden_list::ForbiddenList;
use crate::infrastructure::persistence::SqliteLinkRepository;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<SqliteLinkRepository>>,
    pub forbidden_list: Arc<ForbiddenList>,
    pub pool: Arc<SqlitePool>,
    pub behind_proxy: bool,
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    /// Wires repositories and services on top of an open pool.
    ///
    /// The forbidden list is expected to be loaded already.
    pub fn new(pool: SqlitePool, forbidden_list: Arc<ForbiddenList>, config: &Config) -> Self {
        let pool = Arc::new(pool);

        let link_repository = Arc::new(SqliteLinkRepository::new(pool.clone()));
        let rate_limiter = Arc::new(RateLimiter::new(
            config.max_link_per_hour,
            config.ban_time,
        ));
        let validator = UrlValidator::new(forbidden_list.clone());
        let policy = LinkPolicy {
            expiration_delay: config.expiration_delay,
            max_link_amount: config.max_link_amount,
            website_url: config.website_url.clone(),
        };

        let link_service = Arc::new(LinkService::new(
            link_repository,
            rate_limiter,
            validator,
            policy,
        ));

        Self {
            link_service,
            forbidden_list,
            pool,
            behind_proxy: config.behind_proxy,
            admin_token: config.admin_token.as_deref().map(Arc::from),
        }
    }
}
