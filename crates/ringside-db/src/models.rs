//! Database models - mapped from SQLite tables

use chrono::NaiveDateTime;
use ringside_types::{Boxer, BoxerId, BoxerRecord, ValidationResult};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the `boxers` table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbBoxer {
    pub id: i64,
    pub name: String,
    pub weight: i64,
    pub height: i64,
    pub reach: f64,
    pub age: i64,
    pub fights: i64,
    pub wins: i64,
    pub created_at: NaiveDateTime,
}

impl DbBoxer {
    /// Rebuild the domain boxer, re-validating the stored columns
    pub fn to_boxer(&self) -> ValidationResult<Boxer> {
        Boxer::restore(
            BoxerId(self.id),
            self.name.clone(),
            self.weight,
            self.height,
            self.reach,
            self.age,
        )
    }

    pub fn into_record(self) -> ValidationResult<BoxerRecord> {
        Ok(BoxerRecord {
            boxer: self.to_boxer()?,
            fights: self.fights,
            wins: self.wins,
        })
    }
}
