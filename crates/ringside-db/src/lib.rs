//! Ringside Database Layer
//!
//! Persistence for boxer records.
//!
//! # Architecture
//!
//! - **SQLite** (via SQLx): primary store, one `boxers` table with a
//!   `UNIQUE` name column and the cumulative fight counters
//! - **Memory**: a lock-protected map with the same semantics, used for
//!   tests and for running the server without a database file
//!
//! # Repository Pattern
//!
//! `BoxerRepo` exposes the CRUD and stats queries and implements the
//! `BoxerStore` port from `ringside-types`, which is all the ring and the
//! leaderboard ever see.

pub mod config;
pub mod error;
pub mod memory;
pub mod models;
pub mod repos;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::{error, info};

pub use config::DatabaseConfig;
pub use error::{DbError, DbResult};
pub use memory::MemoryBoxerStore;
pub use models::*;
pub use repos::*;

/// Table holding boxer records
pub const BOXERS_TABLE: &str = "boxers";

/// Database connection pool
pub struct Database {
    /// SQLite connection pool
    pub pool: SqlitePool,
}

impl Database {
    /// Connect to SQLite
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        info!(url = %config.database_url, "Opening database connection");

        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| DbError::Connection(format!("{}: {}", config.database_url, e)))?
            .create_if_missing(config.create_if_missing);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs));

        if config.is_in_memory() {
            // Dropping the only connection would drop the database with it
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection(format!("SQLite: {}", e)))?;

        info!("Connected to SQLite");

        Ok(Self { pool })
    }

    /// Open a private in-memory database with migrations applied
    pub async fn in_memory() -> DbResult<Self> {
        let db = Self::connect(&DatabaseConfig::in_memory()).await?;
        db.migrate().await?;
        Ok(db)
    }

    /// Run database migrations
    pub async fn migrate(&self) -> DbResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration(e.to_string()))?;
        info!("Migrations complete");
        Ok(())
    }

    /// Check the connection answers a trivial query
    pub async fn check_connection(&self) -> DbResult<()> {
        info!("Checking database connection...");
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Database connection error");
                DbError::Connection(e.to_string())
            })?;
        info!("Database connection is healthy");
        Ok(())
    }

    /// Check a table exists in the SQLite catalog
    pub async fn check_table_exists(&self, table: &str) -> DbResult<()> {
        info!(table, "Checking table exists");
        let row = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(table)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let name: String = row.try_get("name")?;
                info!(table = %name, "Table exists");
                Ok(())
            }
            None => {
                error!(table, "Table does not exist");
                Err(DbError::MissingTable(table.to_string()))
            }
        }
    }

    /// Health check for the connection and the schema
    pub async fn health_check(&self) -> HealthStatus {
        let connection = self.check_connection().await.is_ok();
        let schema = connection && self.check_table_exists(BOXERS_TABLE).await.is_ok();

        HealthStatus {
            connection,
            schema,
            healthy: connection && schema,
        }
    }

    /// Create repository instances
    pub fn boxer_repo(&self) -> BoxerRepo {
        BoxerRepo::new(self.pool.clone())
    }
}

/// Health status of the database
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub connection: bool,
    pub schema: bool,
    pub healthy: bool,
}
