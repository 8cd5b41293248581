//! Boxer Handlers
//!
//! Create, look up and delete boxers, and record single fight results.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use ringside_types::{BoxerId, FightOutcome};
use std::sync::Arc;
use tracing::info;

use crate::dto::{BoxerResponse, CreateBoxerRequest, MessageResponse, UpdateStatsRequest};
use crate::error::ApiResult;
use crate::state::AppState;

/// Create a boxer
pub async fn create_boxer(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateBoxerRequest>,
) -> ApiResult<(StatusCode, Json<BoxerResponse>)> {
    info!(name = %request.name, "Creating boxer");
    let new_boxer = request.validate()?;
    let boxer = state.store.create_boxer(&new_boxer).await?;

    Ok((StatusCode::CREATED, Json(BoxerResponse::from_boxer(&boxer)?)))
}

/// Get a boxer by ID
pub async fn get_boxer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<BoxerResponse>> {
    let boxer = state.store.get_boxer_by_id(BoxerId(id)).await?;
    Ok(Json(BoxerResponse::from_boxer(&boxer)?))
}

/// Get a boxer by exact name
pub async fn get_boxer_by_name(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<BoxerResponse>> {
    let boxer = state.store.get_boxer_by_name(&name).await?;
    Ok(Json(BoxerResponse::from_boxer(&boxer)?))
}

/// Permanently delete a boxer
pub async fn delete_boxer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let id = BoxerId(id);
    state.store.delete_boxer(id).await?;
    Ok(Json(MessageResponse::success(format!(
        "Boxer with ID {} deleted",
        id
    ))))
}

/// Record one fight result for a boxer
pub async fn update_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateStatsRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let id = BoxerId(id);
    let outcome: FightOutcome = request.result.parse()?;
    state.store.update_stats(id, outcome).await?;

    Ok(Json(MessageResponse::success(format!(
        "Recorded {} for boxer {}",
        outcome, id
    ))))
}
