//! Arena error types

use ringside_types::{StoreError, ValidationError};
use thiserror::Error;

use crate::random::RandomError;
use crate::ring::MAX_BOXERS;

/// Ring and leaderboard errors
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("Ring is full, cannot add more than {max} boxers.", max = MAX_BOXERS)]
    RingFull,

    #[error("There must be two boxers to start a fight, found {found}.")]
    NotEnoughBoxers { found: usize },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Random number unavailable: {0}")]
    Random(#[from] RandomError),
}

/// Result type for arena operations
pub type ArenaResult<T> = Result<T, ArenaError>;
