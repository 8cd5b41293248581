//! Leaderboard
//!
//! Read-only ranking over every boxer with at least one recorded fight.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ringside_types::{BoxerId, BoxerRecord, BoxerStore, ValidationError, WeightClass};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ArenaResult;

// ============================================================================
// Sort keys
// ============================================================================

/// Leaderboard ordering, always descending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeaderboardSort {
    /// Total wins
    #[default]
    #[serde(rename = "total-wins", alias = "wins")]
    Wins,
    /// Wins as a share of fights
    #[serde(rename = "win-percentage", alias = "win_pct")]
    WinPct,
}

impl LeaderboardSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wins => "total-wins",
            Self::WinPct => "win-percentage",
        }
    }

    fn compare(&self, a: &BoxerRecord, b: &BoxerRecord) -> Ordering {
        match self {
            Self::Wins => b.wins.cmp(&a.wins),
            // Cross-multiplied so equal ratios compare equal
            Self::WinPct => (b.wins * a.fights).cmp(&(a.wins * b.fights)),
        }
    }
}

impl fmt::Display for LeaderboardSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaderboardSort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "total-wins" | "wins" => Ok(Self::Wins),
            "win-percentage" | "win_pct" => Ok(Self::WinPct),
            other => Err(ValidationError::InvalidSort(other.to_string())),
        }
    }
}

// ============================================================================
// Rows
// ============================================================================

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub id: BoxerId,
    pub name: String,
    pub weight: i64,
    pub height: i64,
    pub reach: f64,
    pub age: i64,
    pub weight_class: WeightClass,
    pub fights: i64,
    pub wins: i64,
    /// Percentage rounded to one decimal place
    pub win_pct: f64,
}

impl LeaderboardEntry {
    pub fn from_record(record: &BoxerRecord) -> ArenaResult<Self> {
        let boxer = &record.boxer;
        Ok(Self {
            id: boxer.id(),
            name: boxer.name().to_string(),
            weight: boxer.weight(),
            height: boxer.height(),
            reach: boxer.reach(),
            age: boxer.age(),
            weight_class: boxer.weight_class()?,
            fights: record.fights,
            wins: record.wins,
            win_pct: record.win_pct(),
        })
    }
}

// ============================================================================
// Query
// ============================================================================

/// Leaderboard over a boxer store
pub struct Leaderboard {
    store: Arc<dyn BoxerStore>,
}

impl Leaderboard {
    pub fn new(store: Arc<dyn BoxerStore>) -> Self {
        Self { store }
    }

    /// Rank every boxer with fights, best first
    ///
    /// Ties keep the store's id order.
    pub async fn get(&self, sort: LeaderboardSort) -> ArenaResult<Vec<LeaderboardEntry>> {
        info!(sort = %sort, "Building leaderboard");

        let mut records = self.store.list_with_fights().await?;
        records.retain(|r| r.fights > 0);
        records.sort_by(|a, b| sort.compare(a, b));

        let entries = records
            .iter()
            .map(LeaderboardEntry::from_record)
            .collect::<ArenaResult<Vec<_>>>()?;

        info!(sort = %sort, rows = entries.len(), "Leaderboard built");
        Ok(entries)
    }
}
