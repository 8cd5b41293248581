//! Boxer entity
//!
//! `NewBoxer` is the validated input for creation, `Boxer` is a stored boxer
//! with its identity, and `BoxerRecord` pairs a boxer with the cumulative
//! stats the store keeps for it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ValidationError, ValidationResult};
use crate::weight_class::{WeightClass, MIN_WEIGHT};

/// Youngest age accepted
pub const MIN_AGE: i64 = 18;
/// Oldest age accepted
pub const MAX_AGE: i64 = 40;

/// Store-assigned boxer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoxerId(pub i64);

impl BoxerId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for BoxerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for BoxerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Validated boxer attributes, ready to be persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBoxer {
    name: String,
    weight: i64,
    height: i64,
    reach: f64,
    age: i64,
}

impl NewBoxer {
    /// Validate raw attributes.
    ///
    /// Checks run in a fixed order (name, weight, height, reach, age) and
    /// the first violation is returned.
    pub fn new(
        name: impl Into<String>,
        weight: i64,
        height: i64,
        reach: f64,
        age: i64,
    ) -> ValidationResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if weight < MIN_WEIGHT {
            return Err(ValidationError::WeightTooLow { weight });
        }
        if height <= 0 {
            return Err(ValidationError::NonPositiveHeight { height });
        }
        if !reach.is_finite() || reach <= 0.0 {
            return Err(ValidationError::NonPositiveReach { reach });
        }
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ValidationError::AgeOutOfRange { age });
        }

        Ok(Self {
            name,
            weight,
            height,
            reach,
            age,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> i64 {
        self.weight
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    pub fn reach(&self) -> f64 {
        self.reach
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    /// Attach the identity assigned by the store
    pub fn into_boxer(self, id: BoxerId) -> Boxer {
        Boxer { id, attrs: self }
    }
}

/// A persisted boxer
///
/// Read-only once built. The only way to get one is through a validated
/// `NewBoxer` or [`Boxer::restore`], which re-validates stored rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Boxer {
    id: BoxerId,
    #[serde(flatten)]
    attrs: NewBoxer,
}

impl Boxer {
    /// Rebuild a boxer from stored columns
    pub fn restore(
        id: BoxerId,
        name: impl Into<String>,
        weight: i64,
        height: i64,
        reach: f64,
        age: i64,
    ) -> ValidationResult<Self> {
        Ok(NewBoxer::new(name, weight, height, reach, age)?.into_boxer(id))
    }

    pub fn id(&self) -> BoxerId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.attrs.name()
    }

    pub fn weight(&self) -> i64 {
        self.attrs.weight()
    }

    pub fn height(&self) -> i64 {
        self.attrs.height()
    }

    pub fn reach(&self) -> f64 {
        self.attrs.reach()
    }

    pub fn age(&self) -> i64 {
        self.attrs.age()
    }

    /// Weight class, recomputed from weight on every call
    pub fn weight_class(&self) -> ValidationResult<WeightClass> {
        WeightClass::from_weight(self.weight())
    }
}

/// A boxer together with the stats the store accumulates for it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxerRecord {
    pub boxer: Boxer,
    /// Total fights recorded
    pub fights: i64,
    /// Fights won
    pub wins: i64,
}

impl BoxerRecord {
    /// Win percentage (0-100) rounded to one decimal place
    pub fn win_pct(&self) -> f64 {
        if self.fights <= 0 {
            return 0.0;
        }
        let pct = self.wins as f64 / self.fights as f64 * 100.0;
        (pct * 10.0).round() / 10.0
    }
}

/// Result recorded against a single boxer after a fight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FightOutcome {
    Win,
    Loss,
}

impl FightOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Loss => "loss",
        }
    }

    /// Wins to add for this outcome
    pub fn win_increment(&self) -> i64 {
        match self {
            Self::Win => 1,
            Self::Loss => 0,
        }
    }
}

impl fmt::Display for FightOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FightOutcome {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "win" => Ok(Self::Win),
            "loss" => Ok(Self::Loss),
            other => Err(ValidationError::InvalidOutcome(other.to_string())),
        }
    }
}
