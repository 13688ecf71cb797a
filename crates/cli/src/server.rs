//! # CLI Server
//!
//! Startup of the HTTP server: connect, migrate, seed, serve until a
//! shutdown signal arrives.

use std::net::SocketAddr;

use anyhow::{anyhow, Context as _};
use migration::{
    seeds::{run_all_seeds, SeedConfig},
    Migrator,
    MigratorTrait as _,
};
use server::{create_router, AppState, ServerResult};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{commands::ServeArgs, config::parse_socket_addr};

/// Starts the API server
///
/// # Arguments
///
/// * `database_url` - Connection URL of the database
/// * `args` - Serve command arguments
pub async fn serve(database_url: &str, args: &ServeArgs) -> anyhow::Result<()> {
    info!(target: "serve", "Starting API server...");

    let db = migration::connect_to_database(database_url)
        .await
        .context("Failed to connect to database")?;

    info!(target: "serve", "Running database migrations...");
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;

    for result in run_all_seeds(&db, &SeedConfig::from_env(), false).await? {
        if !result.is_success() {
            warn!(target: "serve", seed = %result.seed_name, errors = ?result.errors, "Seed failed, continuing");
        }
    }

    let state = AppState::new(db, args.secure_cookies);
    let app = create_router(state);

    let address = parse_socket_addr(&args.host, args.port).map_err(|e| anyhow!("Invalid address {}:{}: {}", args.host, args.port, e))?;
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;

    let started = ServerResult::new(&address.to_string());
    info!(
        target: "serve",
        address = %started.address,
        started_at = %started.started_at,
        secure_cookies = args.secure_cookies,
        "Listening"
    );

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!(target: "serve", "Server stopped");
    Ok(())
}

/// Waits for shutdown signals (Ctrl+C or SIGTERM)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(target: "serve", error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                warn!(target: "serve", error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!(target: "serve", "Shutdown signal received");
}
