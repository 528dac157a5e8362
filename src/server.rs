//! HTTP server initialization and runtime setup.
//!
//! Handles the database, the forbidden websites list, and the Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::forbidden_list::ForbiddenList;
use crate::infrastructure::persistence::{connect, run_migrations};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Apply migrations
/// - Forbidden websites list (fetched with retries; failure is fatal)
/// - Optional periodic refresh of the forbidden list
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The forbidden websites list cannot be loaded
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect(
        &config.database_url,
        config.db_max_connections,
        Duration::from_secs(config.db_connect_timeout),
    )
    .await?;
    tracing::info!("Connected to database");

    run_migrations(&pool)
        .await
        .context("Failed to apply migrations")?;

    let forbidden_list = Arc::new(
        ForbiddenList::new(
            config.forbidden_list_provider.clone(),
            Duration::from_secs(config.forbidden_list_fetch_timeout),
        )
        .context("Failed to build HTTP client")?,
    );

    if let Err(e) = forbidden_list
        .refresh_with_retry(config.forbidden_list_fetch_retries)
        .await
    {
        tracing::error!(
            kind = e.kind(),
            provider = %config.forbidden_list_provider,
            "Cannot start without the forbidden websites list"
        );
        return Err(e.into());
    }

    let refresher = (config.forbidden_list_refresh_interval > 0).then(|| {
        tracing::info!(
            interval = config.forbidden_list_refresh_interval,
            "Forbidden list refresher started"
        );
        forbidden_list
            .clone()
            .spawn_refresher(Duration::from_secs(config.forbidden_list_refresh_interval))
    });

    let state = AppState::new(pool.clone(), forbidden_list, &config);

    if config.is_admin_enabled() {
        tracing::info!("Admin API enabled");
    }

    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    if let Some(handle) = refresher {
        handle.abort();
    }
    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C, or on SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
