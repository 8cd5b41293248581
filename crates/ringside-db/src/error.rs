//! Database error types

use ringside_types::{StoreError, ValidationError};
use thiserror::Error;

/// Database operation errors
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] ValidationError),

    #[error("Missing table: {0}")]
    MissingTable(String),
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(what) => StoreError::NotFound(what),
            DbError::Duplicate(what) => StoreError::Duplicate(what),
            DbError::InvalidRecord(e) => StoreError::Invalid(e),
            other => StoreError::Backend(other.to_string()),
        }
    }
}
