//! Ringside API Server
//!
//! Serves the boxer registry, the ring and the leaderboard over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (SQLite file, random.org)
//! ringside-server
//!
//! # Start with custom config
//! ringside-server --config /path/to/config.toml
//!
//! # Keep everything in memory
//! ringside-server --memory
//!
//! # Start with environment overrides
//! RINGSIDE__SERVER__PORT=8080 ringside-server
//! ```

mod config;

use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ringside_api::{create_router, ApiConfig, AppState};
use ringside_arena::{RandomOrgClient, RandomSource};
use ringside_db::{Database, MemoryBoxerStore};
use ringside_types::BoxerStore;

use crate::config::ServerConfig;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Ringside API Server - boxers, fights and rankings
#[derive(Parser, Debug)]
#[command(name = "ringside-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML, JSON, or YAML)
    #[arg(short, long, env = "RINGSIDE_CONFIG")]
    config: Option<String>,

    /// Host to bind to
    #[arg(long, env = "RINGSIDE_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "RINGSIDE_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RINGSIDE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, env = "RINGSIDE_LOG_FORMAT")]
    log_format: Option<String>,

    /// SQLite connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// random.org decimal-fractions URL
    #[arg(long, env = "RANDOM_ORG_URL")]
    random_url: Option<String>,

    /// Keep boxers in memory instead of SQLite
    #[arg(long)]
    memory: bool,
}

impl Args {
    /// Apply CLI overrides on top of loaded configuration
    fn apply(self, config: &mut ServerConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
        if let Some(url) = self.database_url {
            config.database.url = url;
        }
        if let Some(url) = self.random_url {
            config.random.url = url;
        }
        if self.memory {
            config.database.in_memory = true;
        }
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut server_config = ServerConfig::load(args.config.as_deref())?;
    args.apply(&mut server_config);

    // Initialize logging
    init_logging(&server_config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Ringside API Server"
    );

    // Initialize record store and randomness source
    let store = init_store(&server_config.database).await?;
    let random = init_random(&server_config.random)?;

    // Create application state
    let state = Arc::new(AppState::new(store, random));

    // Create API configuration
    let api_config = ApiConfig {
        enable_cors: server_config.api.enable_cors,
        cors_origins: server_config.api.cors_origins.clone(),
        enable_tracing: server_config.api.enable_tracing,
    };

    // Create router
    let app = create_router(state, api_config);

    // Get bind address
    let addr = server_config.server.socket_addr()?;

    tracing::info!(
        host = %server_config.server.host,
        port = %server_config.server.port,
        "Server listening"
    );

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

// =============================================================================
// Initialization Functions
// =============================================================================

/// Initialize tracing/logging
fn init_logging(config: &config::LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            subscriber
                .with(fmt::layer().json().with_target(true))
                .try_init()?;
        }
        _ => {
            subscriber
                .with(fmt::layer().pretty().with_target(true))
                .try_init()?;
        }
    }

    Ok(())
}

/// Initialize the boxer store
async fn init_store(config: &config::DatabaseSettings) -> anyhow::Result<Arc<dyn BoxerStore>> {
    if config.in_memory {
        tracing::info!("Using in-memory boxer store");
        return Ok(Arc::new(MemoryBoxerStore::new()));
    }

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.to_db_config()).await?;

    if config.run_migrations {
        db.migrate().await?;
    }

    // Run health check
    let health = db.health_check().await;
    if !health.healthy {
        anyhow::bail!(
            "Database health check failed (connection: {}, schema: {})",
            health.connection,
            health.schema
        );
    }

    tracing::info!("Database health check passed");

    Ok(Arc::new(db.boxer_repo()))
}

/// Initialize the random.org client
fn init_random(config: &config::RandomSettings) -> anyhow::Result<Arc<dyn RandomSource>> {
    let client = RandomOrgClient::new(config.to_random_config())?;
    tracing::info!(url = %client.url(), "Using random.org for fight outcomes");
    Ok(Arc::new(client))
}

// =============================================================================
// Graceful Shutdown
// =============================================================================

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
