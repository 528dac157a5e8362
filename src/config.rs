//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! A `.env` file in the working directory is honoured (loaded by `main` via `dotenvy`).
//!
//! ## Link policy
//!
//! - `EXPIRATION_DELAY` - Seconds a link stays valid after creation or renewal (default: 259200)
//! - `MAX_LINK_AMOUNT` - New links are refused above this many stored links (default: 10000)
//! - `WEBSITE_URL` - Base prepended to every short link (default: `localhost`)
//! - `MAX_LINK_PER_HOUR` - Link creations allowed per client per hour (default: 20)
//! - `BAN_TIME` - Ban length in seconds for clients over the hourly limit (default: 86400)
//!
//! ## Forbidden websites list
//!
//! - `FORBIDDEN_WEBSITES_LIST_PROVIDER` - URL of the JSON list
//! - `FORBIDDEN_LIST_FETCH_TIMEOUT` - Request timeout in seconds (default: 10)
//! - `FORBIDDEN_LIST_FETCH_RETRIES` - Retries of an unavailable provider at startup (default: 3)
//! - `FORBIDDEN_LIST_REFRESH_INTERVAL` - Periodic refresh in seconds, `0` disables (default: 0)
//!
//! ## Service
//!
//! - `DATABASE_URL` - SQLite database (default: `sqlite://data/data.db`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Read client IPs from `X-Forwarded-For` / `X-Real-IP` (default: `false`)
//! - `ADMIN_TOKEN` - Bearer token enabling the admin API (default: unset, admin API disabled)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_CONNECT_TIMEOUT` - Pool acquire timeout in seconds (default: 30)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

pub const DEFAULT_FORBIDDEN_LIST_PROVIDER: &str =
    "https://raw.githubusercontent.com/elbkr/bad-websites/refs/heads/main/websites.json";

/// Upper bound for `EXPIRATION_DELAY` and `BAN_TIME` (100 years), keeping
/// `now + delay` far away from `i64` overflow.
pub const MAX_DURATION_SECONDS: i64 = 100 * 365 * 86_400;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub expiration_delay: i64,
    pub max_link_amount: i64,
    pub website_url: String,
    pub max_link_per_hour: u32,
    pub ban_time: i64,

    pub forbidden_list_provider: String,
    pub forbidden_list_fetch_timeout: u64,
    pub forbidden_list_fetch_retries: usize,
    /// Seconds between background refreshes of the forbidden list; `0` disables them.
    pub forbidden_list_refresh_interval: u64,

    pub database_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, the client IP is read from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    /// Bearer token for `/api/admin/*`. The admin API is not mounted when unset.
    pub admin_token: Option<String>,

    /// Maximum number of connections in the pool.
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool, in seconds.
    pub db_connect_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but does not parse.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            expiration_delay: parse_var("EXPIRATION_DELAY", 259_200)?,
            max_link_amount: parse_var("MAX_LINK_AMOUNT", 10_000)?,
            website_url: env::var("WEBSITE_URL").unwrap_or_else(|_| "localhost".to_string()),
            max_link_per_hour: parse_var("MAX_LINK_PER_HOUR", 20)?,
            ban_time: parse_var("BAN_TIME", 86_400)?,

            forbidden_list_provider: env::var("FORBIDDEN_WEBSITES_LIST_PROVIDER")
                .unwrap_or_else(|_| DEFAULT_FORBIDDEN_LIST_PROVIDER.to_string()),
            forbidden_list_fetch_timeout: parse_var("FORBIDDEN_LIST_FETCH_TIMEOUT", 10)?,
            forbidden_list_fetch_retries: parse_var("FORBIDDEN_LIST_FETCH_RETRIES", 3)?,
            forbidden_list_refresh_interval: parse_var("FORBIDDEN_LIST_REFRESH_INTERVAL", 0)?,

            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/data.db".to_string()),
            listen_addr: env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
            behind_proxy: env::var("BEHIND_PROXY")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
            admin_token: env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty()),

            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            db_connect_timeout: parse_var("DB_CONNECT_TIMEOUT", 30)?,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a delay, limit or timeout is not positive
    /// - `EXPIRATION_DELAY` or `BAN_TIME` exceeds [`MAX_DURATION_SECONDS`]
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `database_url` is not a `sqlite:` URL
    pub fn validate(&self) -> Result<()> {
        if self.expiration_delay <= 0 {
            anyhow::bail!(
                "EXPIRATION_DELAY must be greater than 0, got {}",
                self.expiration_delay
            );
        }

        if self.max_link_amount <= 0 {
            anyhow::bail!(
                "MAX_LINK_AMOUNT must be greater than 0, got {}",
                self.max_link_amount
            );
        }

        if self.max_link_per_hour == 0 {
            anyhow::bail!("MAX_LINK_PER_HOUR must be at least 1");
        }

        if self.ban_time <= 0 {
            anyhow::bail!("BAN_TIME must be greater than 0, got {}", self.ban_time);
        }

        if self.expiration_delay > MAX_DURATION_SECONDS {
            anyhow::bail!(
                "EXPIRATION_DELAY must be at most {MAX_DURATION_SECONDS}, got {}",
                self.expiration_delay
            );
        }

        if self.ban_time > MAX_DURATION_SECONDS {
            anyhow::bail!(
                "BAN_TIME must be at most {MAX_DURATION_SECONDS}, got {}",
                self.ban_time
            );
        }

        if self.website_url.is_empty() {
            anyhow::bail!("WEBSITE_URL must not be empty");
        }

        if !self.forbidden_list_provider.starts_with("http://")
            && !self.forbidden_list_provider.starts_with("https://")
        {
            anyhow::bail!(
                "FORBIDDEN_WEBSITES_LIST_PROVIDER must be an http(s) URL, got '{}'",
                self.forbidden_list_provider
            );
        }

        if self.forbidden_list_fetch_timeout == 0 {
            anyhow::bail!("FORBIDDEN_LIST_FETCH_TIMEOUT must be greater than 0");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    /// Returns whether the admin API is mounted.
    pub fn is_admin_enabled(&self) -> bool {
        self.admin_token.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Website URL: {}", self.website_url);
        tracing::info!("  Expiration delay: {}s", self.expiration_delay);
        tracing::info!("  Max link amount: {}", self.max_link_amount);
        tracing::info!(
            "  Rate limit: {}/hour, ban {}s",
            self.max_link_per_hour,
            self.ban_time
        );
        tracing::info!("  Forbidden list: {}", self.forbidden_list_provider);

        if self.forbidden_list_refresh_interval > 0 {
            tracing::info!(
                "  Forbidden list refresh: every {}s",
                self.forbidden_list_refresh_interval
            );
        } else {
            tracing::info!("  Forbidden list refresh: disabled");
        }

        match self.admin_token {
            Some(ref token) => tracing::info!("  Admin API: enabled ({})", mask_token(token)),
            None => tracing::info!("  Admin API: disabled"),
        }

        tracing::info!("  Behind proxy: {}", self.behind_proxy);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads `name` and parses it, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value '{value}'")),
        Err(_) => Ok(default),
    }
}

/// Keeps the first four characters of a secret for log correlation.
fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    format!("{visible}***")
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable does not parse or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
