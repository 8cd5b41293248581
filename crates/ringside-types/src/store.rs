//! Record store port
//!
//! The ring and the leaderboard only see boxers through this trait. The
//! database layer provides the SQLite and in-memory implementations.

use async_trait::async_trait;
use thiserror::Error;

use crate::boxer::{Boxer, BoxerId, BoxerRecord, FightOutcome, NewBoxer};
use crate::error::ValidationError;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by a `BoxerStore`
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Duplicate(String),

    /// A stored row no longer satisfies the boxer invariants
    #[error("Invalid stored record: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn boxer_id_not_found(id: BoxerId) -> Self {
        Self::NotFound(format!("Boxer with ID {}", id))
    }

    pub fn boxer_name_not_found(name: &str) -> Self {
        Self::NotFound(format!("Boxer '{}'", name))
    }

    pub fn duplicate_name(name: &str) -> Self {
        Self::Duplicate(format!("Boxer with name '{}'", name))
    }
}

/// Persistent boxer records
///
/// Implementations must make `update_stats` atomic per row and must reject
/// a duplicate name instead of overwriting the existing boxer.
#[async_trait]
pub trait BoxerStore: Send + Sync {
    /// Insert a new boxer and return it with its assigned id
    async fn create_boxer(&self, boxer: &NewBoxer) -> StoreResult<Boxer>;

    /// Permanently remove a boxer
    async fn delete_boxer(&self, id: BoxerId) -> StoreResult<()>;

    async fn get_boxer_by_id(&self, id: BoxerId) -> StoreResult<Boxer>;

    /// Exact, case-sensitive match after trimming surrounding whitespace
    async fn get_boxer_by_name(&self, name: &str) -> StoreResult<Boxer>;

    /// Record one fight: fights += 1, and wins += 1 on a win
    async fn update_stats(&self, id: BoxerId, outcome: FightOutcome) -> StoreResult<()>;

    /// Every boxer with at least one recorded fight, ordered by id
    async fn list_with_fights(&self) -> StoreResult<Vec<BoxerRecord>>;

    /// Verify the backing storage is reachable and initialised
    async fn health_check(&self) -> StoreResult<()>;
}
