//! Leaderboard Handlers

use axum::{
    extract::{Query, State},
    Json,
};
use ringside_arena::LeaderboardSort;
use std::sync::Arc;

use crate::dto::{LeaderboardQuery, LeaderboardResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// Ranked boxers, sorted by `total-wins` (default) or `win-percentage`
pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> ApiResult<Json<LeaderboardResponse>> {
    let sort = match query.sort.as_deref() {
        Some(sort) => sort.parse::<LeaderboardSort>()?,
        None => LeaderboardSort::default(),
    };
    let leaderboard = state.leaderboard.get(sort).await?;

    Ok(Json(LeaderboardResponse { sort, leaderboard }))
}
