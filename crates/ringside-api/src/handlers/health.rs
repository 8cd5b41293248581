//! Health Check Handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}

/// Database check response
#[derive(Debug, Serialize)]
pub struct DbCheckResponse {
    /// healthy / unhealthy
    pub status: String,
    /// Error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check endpoint
///
/// Returns 200 if the service is running. Dependencies are not checked.
pub async fn health_check() -> Json<HealthResponse> {
    info!("Health check");
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Database check endpoint
///
/// Verifies the store answers and the boxers table exists. Returns 503
/// otherwise.
pub async fn db_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<DbCheckResponse>) {
    match state.store.health_check().await {
        Ok(()) => {
            info!("Database check passed");
            (
                StatusCode::OK,
                Json(DbCheckResponse {
                    status: "healthy".to_string(),
                    error: None,
                }),
            )
        }
        Err(e) => {
            warn!(error = %e, "Database check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(DbCheckResponse {
                    status: "unhealthy".to_string(),
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
