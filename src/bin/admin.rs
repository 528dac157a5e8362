//! CLI administration tool for very-short-link.
//!
//! Works directly on the SQLite database, so it can be used while the server
//! is stopped or running (the database runs in WAL mode).
//!
//! # Usage
//!
//! ```bash
//! # List stored links with their remaining lifetime
//! cargo run --bin admin -- links list
//!
//! # Delete a link by its token
//! cargo run --bin admin -- links delete 1a
//!
//! # Remove expired links now
//! cargo run --bin admin -- links sweep
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Key-value settings
//! cargo run --bin admin -- setting set motd "Hello"
//! cargo run --bin admin -- setting list
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (default: `sqlite://data/data.db`)

use very_short_link::domain::repositories::{LinkRepository, SettingRepository};
use very_short_link::infrastructure::persistence::{
    SqliteLinkRepository, SqliteSettingRepository, connect, run_migrations,
};
use very_short_link::utils::encoding::{decode_endpoint, token_to_id};
use very_short_link::utils::timespan::format_timespan;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing very-short-link.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Manage key-value settings
    Setting {
        #[command(subcommand)]
        action: SettingAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all stored links
    List,

    /// Delete a link by its token
    Delete {
        /// Hexadecimal token, as found in the short link
        token: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Delete every expired link
    Sweep,
}

/// Setting subcommands.
#[derive(Subcommand)]
enum SettingAction {
    /// Print the value of a setting
    Get { key: String },

    /// Create or replace a setting
    Set { key: String, value: String },

    /// List all settings
    List,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/data.db".to_string());

    let pool = connect(&database_url, 1, Duration::from_secs(30))
        .await
        .context("Failed to connect to database")?;

    run_migrations(&pool)
        .await
        .context("Failed to apply migrations")?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Setting { action } => handle_setting_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &database_url).await?,
    }

    pool.close().await;

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &SqlitePool) -> Result<()> {
    let repo = SqliteLinkRepository::new(Arc::new(pool.clone()));

    match action {
        LinkAction::List => list_links(&repo).await?,
        LinkAction::Delete { token, yes } => delete_link(&repo, &token, yes).await?,
        LinkAction::Sweep => sweep_links(&repo).await?,
    }

    Ok(())
}

/// Lists all links, expired ones included until the next sweep.
///
/// # Output Format
///
/// ```text
/// 🔗 Links
///
///   Token    Expires in                     URL
///   ──────────────────────────────────────────────────────────────────
///   1        2 days, 23 hours and 59 minutes example.com/page
///   1a       EXPIRED                        https://rust-lang.org
/// ```
async fn list_links(repo: &SqliteLinkRepository) -> Result<()> {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    let links = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    let now = Utc::now().timestamp();

    println!(
        "  {:<8} {:<32} {}",
        "Token".bright_white().bold(),
        "Expires in".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        let expires = if link.is_expired(now) {
            "EXPIRED".red()
        } else {
            format_timespan(link.remaining_seconds(now)).green()
        };

        let url = decode_endpoint(&link.endpoint)
            .map(|u| u.normal())
            .unwrap_or_else(|| "<undecodable>".red());

        println!("  {:<8} {:<32} {}", link.token().cyan(), expires, url);
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a link by token with confirmation prompt.
async fn delete_link(repo: &SqliteLinkRepository, token: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();

    let id = token_to_id(token).with_context(|| format!("'{token}' is not a valid token"))?;

    let endpoint = repo
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Link not found")?;

    let url = decode_endpoint(&endpoint).unwrap_or(endpoint);

    println!("  Token: {}", token.to_lowercase().cyan());
    println!("  ID:    {}", id.to_string().bright_black());
    println!("  URL:   {}", url.bright_white());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    repo.delete_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

async fn sweep_links(repo: &SqliteLinkRepository) -> Result<()> {
    let removed = repo
        .sweep_expired(Utc::now().timestamp())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to sweep links: {}", e))?;

    println!(
        "{} {}",
        "✅ Expired links removed:".green().bold(),
        removed.to_string().bright_white().bold()
    );

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Number of stored links, and how many of them are expired
/// - Next expiration date
/// - Number of settings
async fn handle_stats(pool: &SqlitePool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let pool = Arc::new(pool.clone());
    let links = SqliteLinkRepository::new(pool.clone())
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;
    let settings = SqliteSettingRepository::new(pool)
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list settings: {}", e))?;

    let now = Utc::now().timestamp();
    let expired = links.iter().filter(|l| l.is_expired(now)).count();
    let next_expiry = links
        .iter()
        .filter(|l| !l.is_expired(now))
        .map(|l| l.expiration_date)
        .min()
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "-".to_string());

    println!(
        "  Links:         {}",
        links.len().to_string().bright_green().bold()
    );
    println!(
        "  Expired:       {}",
        expired.to_string().bright_yellow().bold()
    );
    println!("  Next expiry:   {}", next_expiry.bright_white());
    println!(
        "  Settings:      {}",
        settings.len().to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Dispatches setting commands.
async fn handle_setting_action(action: SettingAction, pool: &SqlitePool) -> Result<()> {
    let repo = SqliteSettingRepository::new(Arc::new(pool.clone()));

    match action {
        SettingAction::Get { key } => {
            let value = repo
                .get(&key)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            match value {
                Some(v) => println!("{}", v),
                None => println!("{}", format!("Setting '{key}' is not set").yellow()),
            }
        }
        SettingAction::Set { key, value } => {
            repo.set(&key, &value)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to save setting: {}", e))?;

            println!("{} {} = {}", "✅".green(), key.cyan(), value.bright_white());
        }
        SettingAction::List => {
            let settings = repo
                .list()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list settings: {}", e))?;

            if settings.is_empty() {
                println!("{}", "  No settings found".yellow());
                return Ok(());
            }

            for setting in settings {
                println!(
                    "  {:<32} {}",
                    setting.key.cyan(),
                    setting.value.unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool, database_url: &str) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;

            println!("  Database: {}", database_url.bright_white());
            println!("  SQLite:   {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
