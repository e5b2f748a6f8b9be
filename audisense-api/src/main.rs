//! audisense-api - Hearing test records API server
//!
//! Serves the `/api/hearingtests` resource from a volatile in-memory store.
//! Records do not survive a restart.

use std::path::PathBuf;

use anyhow::{Context, Result};
use audisense_common::config::{
    load_toml_config, resolve_config_path, ServerConfig, SERVER_CONFIG_FILE,
};
use audisense_api::{build_router, AppState};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for audisense-api
#[derive(Parser, Debug)]
#[command(name = "audisense-api")]
#[command(about = "Hearing test records API server")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, env = "AUDISENSE_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "AUDISENSE_PORT")]
    port: Option<u16>,

    /// Insert sample hearing tests on startup
    #[arg(long, env = "AUDISENSE_SEED")]
    seed: bool,

    /// TOML config file (defaults to <config dir>/audisense/audisense-api.toml)
    #[arg(short, long, env = "AUDISENSE_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref(), SERVER_CONFIG_FILE);
    let mut config: ServerConfig =
        load_toml_config(config_path.as_deref()).context("Failed to load server configuration")?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    config.seed_sample_data |= args.seed;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!(
        "Starting AudiSense API (audisense-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    if let Some(path) = &config_path {
        info!("Config file: {}", path.display());
    }

    let state = AppState::in_memory();
    if config.seed_sample_data {
        state
            .service
            .seed_sample_data(chrono::Utc::now())
            .await
            .context("Failed to seed sample data")?;
    }

    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("audisense-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
