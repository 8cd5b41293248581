//! API error handling
//!
//! Every domain error maps to one HTTP status and a JSON body of the form
//! `{"status": "error", "message": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ringside_arena::{ArenaError, RandomError};
use ringside_types::{StoreError, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// API error
#[derive(Debug, Error)]
pub enum ApiError {
    // =========================================================================
    // Client errors
    // =========================================================================
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    RingFull(String),

    #[error("{0}")]
    NotEnoughBoxers(String),

    // =========================================================================
    // Upstream and server errors
    // =========================================================================
    #[error("{0}")]
    RandomUnavailable(String),

    #[error("{0}")]
    RandomTimeout(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) | Self::RingFull(_) => StatusCode::CONFLICT,
            Self::NotEnoughBoxers(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RandomUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::RandomTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            status: "error".to_string(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(%status, error = %self, "Request failed");
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

// Implement From conversions
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound(err.to_string()),
            StoreError::Duplicate(_) => Self::Conflict(err.to_string()),
            StoreError::Invalid(_) | StoreError::Backend(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<RandomError> for ApiError {
    fn from(err: RandomError) -> Self {
        match err {
            RandomError::Timeout => Self::RandomTimeout(err.to_string()),
            _ => Self::RandomUnavailable(err.to_string()),
        }
    }
}

impl From<ArenaError> for ApiError {
    fn from(err: ArenaError) -> Self {
        match err {
            ArenaError::RingFull => Self::RingFull(err.to_string()),
            ArenaError::NotEnoughBoxers { .. } => Self::NotEnoughBoxers(err.to_string()),
            ArenaError::Validation(e) => e.into(),
            ArenaError::Store(e) => e.into(),
            ArenaError::Random(e) => e.into(),
        }
    }
}
