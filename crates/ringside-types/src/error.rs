//! Validation errors
//!
//! Every rejected input is reported through an explicit variant naming the
//! offending field and the bound it violated.

use thiserror::Error;

use crate::boxer::{MAX_AGE, MIN_AGE};
use crate::weight_class::MIN_WEIGHT;

/// Result type for validation
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Malformed input rejected before it reaches the store or the ring
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid name: must not be empty")]
    EmptyName,

    #[error("Invalid weight: {weight}. Must be at least {min}.", min = MIN_WEIGHT)]
    WeightTooLow { weight: i64 },

    #[error("Invalid height: {height}. Must be greater than 0.")]
    NonPositiveHeight { height: i64 },

    #[error("Invalid reach: {reach}. Must be greater than 0.")]
    NonPositiveReach { reach: f64 },

    #[error("Invalid age: {age}. Must be between {min} and {max}.", min = MIN_AGE, max = MAX_AGE)]
    AgeOutOfRange { age: i64 },

    #[error("Invalid result: {0}. Expected 'win' or 'loss'.")]
    InvalidOutcome(String),

    #[error("Invalid sort_by parameter: {0}")]
    InvalidSort(String),
}
