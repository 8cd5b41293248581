//! Ring Handlers
//!
//! Every handler holds the ring lock for its whole duration.

use axum::{extract::State, Json};
use ringside_arena::Ring;
use std::sync::Arc;

use crate::dto::{BoxerResponse, EnterRingRequest, FightResponse, MessageResponse, RingResponse};
use crate::error::ApiResult;
use crate::state::AppState;

fn ring_response(ring: &Ring) -> ApiResult<RingResponse> {
    let boxers = ring
        .boxers()
        .iter()
        .map(BoxerResponse::from_boxer)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RingResponse { boxers })
}

/// Enter a boxer into the ring by name
pub async fn enter_ring(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EnterRingRequest>,
) -> ApiResult<Json<RingResponse>> {
    let mut ring = state.ring.lock().await;
    ring.enter_by_name(&request.name).await?;
    Ok(Json(ring_response(&ring)?))
}

/// List the boxers in the ring
pub async fn get_ring(State(state): State<Arc<AppState>>) -> ApiResult<Json<RingResponse>> {
    let ring = state.ring.lock().await;
    Ok(Json(ring_response(&ring)?))
}

/// Empty the ring
pub async fn clear_ring(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    state.ring.lock().await.clear();
    Json(MessageResponse::success("Ring cleared"))
}

/// Resolve a fight between the two boxers in the ring
pub async fn fight(State(state): State<Arc<AppState>>) -> ApiResult<Json<FightResponse>> {
    let result = state.ring.lock().await.fight().await?;
    Ok(Json(FightResponse::from(&result)))
}
