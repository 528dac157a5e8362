#![allow(dead_code)]

use axum::extract::ConnectInfo;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use very_short_link::config::{Config, DEFAULT_FORBIDDEN_LIST_PROVIDER};
use very_short_link::infrastructure::forbidden_list::ForbiddenList;
use very_short_link::state::AppState;
use very_short_link::utils::encoding::encode_endpoint;

pub const ADMIN_TOKEN: &str = "test-admin-token";

pub fn test_config() -> Config {
    Config {
        expiration_delay: 259_200,
        max_link_amount: 10_000,
        website_url: "localhost".to_string(),
        max_link_per_hour: 20,
        ban_time: 86_400,
        forbidden_list_provider: DEFAULT_FORBIDDEN_LIST_PROVIDER.to_string(),
        forbidden_list_fetch_timeout: 10,
        forbidden_list_fetch_retries: 0,
        forbidden_list_refresh_interval: 0,
        database_url: "sqlite::memory:".to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        behind_proxy: false,
        admin_token: Some(ADMIN_TOKEN.to_string()),
        db_max_connections: 5,
        db_connect_timeout: 30,
    }
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    create_test_state_with(pool, &test_config())
}

pub fn create_test_state_with(pool: SqlitePool, config: &Config) -> AppState {
    let forbidden_list = Arc::new(ForbiddenList::from_entries(vec![
        "forbidden.example".to_string(),
    ]));
    AppState::new(pool, forbidden_list, config)
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Inserts a link directly, bypassing the service.
pub async fn create_test_link(pool: &SqlitePool, url: &str, expiration_date: i64) -> i64 {
    sqlx::query("INSERT INTO Link (endpoint, expiration_date) VALUES (?, ?)")
        .bind(encode_endpoint(url))
        .bind(expiration_date)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

pub async fn count_rows(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM Link")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Injects `ConnectInfo` for handlers that read the peer address.
#[derive(Clone)]
pub struct MockConnectInfoLayer {
    addr: SocketAddr,
}

impl MockConnectInfoLayer {
    pub fn new() -> Self {
        Self::with_addr("127.0.0.1:12345".parse().unwrap())
    }

    pub fn with_addr(addr: SocketAddr) -> Self {
        Self { addr }
    }
}

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService {
            inner,
            addr: self.addr,
        }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
    addr: SocketAddr,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(ConnectInfo(self.addr));
        self.inner.call(req)
    }
}
