//! Ring, fight and leaderboard DTOs

use ringside_arena::{FightResult, LeaderboardEntry, LeaderboardSort};
use ringside_types::BoxerId;
use serde::{Deserialize, Serialize};

use super::BoxerResponse;

/// Enter a boxer into the ring by name
#[derive(Debug, Clone, Deserialize)]
pub struct EnterRingRequest {
    pub name: String,
}

/// Current ring members, in entry order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingResponse {
    pub boxers: Vec<BoxerResponse>,
}

/// Outcome of a fight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FightResponse {
    pub status: String,
    pub winner: String,
    pub winner_id: BoxerId,
    pub loser: String,
    pub loser_id: BoxerId,
    pub winner_skill: f64,
    pub loser_skill: f64,
    pub probability: f64,
    pub sample: f64,
}

impl From<&FightResult> for FightResponse {
    fn from(result: &FightResult) -> Self {
        Self {
            status: "success".to_string(),
            winner: result.winner.name().to_string(),
            winner_id: result.winner.id(),
            loser: result.loser.name().to_string(),
            loser_id: result.loser.id(),
            winner_skill: result.winner_skill,
            loser_skill: result.loser_skill,
            probability: result.probability,
            sample: result.sample,
        }
    }
}

/// Leaderboard query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderboardQuery {
    /// `wins` (default) or `win_pct`
    pub sort: Option<String>,
}

/// Ranked leaderboard
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardResponse {
    pub sort: LeaderboardSort,
    pub leaderboard: Vec<LeaderboardEntry>,
}
