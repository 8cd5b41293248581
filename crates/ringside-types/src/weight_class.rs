//! Weight classes
//!
//! A boxer's weight class is derived from weight alone. It is never stored
//! and never settable, so every display path goes back through
//! [`WeightClass::from_weight`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ValidationError, ValidationResult};

/// Lowest weight accepted by any class (pounds)
pub const MIN_WEIGHT: i64 = 125;

/// Weight class bands, ordered lightest to heaviest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WeightClass {
    Featherweight,
    Lightweight,
    Middleweight,
    Heavyweight,
}

impl WeightClass {
    /// Heaviest first
    const DESCENDING: [WeightClass; 4] = [
        Self::Heavyweight,
        Self::Middleweight,
        Self::Lightweight,
        Self::Featherweight,
    ];

    /// Classify a weight in pounds
    pub fn from_weight(weight: i64) -> ValidationResult<Self> {
        Self::DESCENDING
            .into_iter()
            .find(|class| weight >= class.min_weight())
            .ok_or(ValidationError::WeightTooLow { weight })
    }

    /// Inclusive lower bound for this class
    pub fn min_weight(&self) -> i64 {
        match self {
            Self::Heavyweight => 203,
            Self::Middleweight => 166,
            Self::Lightweight => 133,
            Self::Featherweight => MIN_WEIGHT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Featherweight => "FEATHERWEIGHT",
            Self::Lightweight => "LIGHTWEIGHT",
            Self::Middleweight => "MIDDLEWEIGHT",
            Self::Heavyweight => "HEAVYWEIGHT",
        }
    }
}

impl fmt::Display for WeightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
