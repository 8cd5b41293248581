//! Boxer DTOs

use ringside_types::{Boxer, BoxerId, NewBoxer, ValidationResult, WeightClass};
use serde::{Deserialize, Serialize};

/// Create boxer request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBoxerRequest {
    pub name: String,
    /// Pounds
    pub weight: i64,
    /// Inches
    pub height: i64,
    /// Inches
    pub reach: f64,
    pub age: i64,
}

impl CreateBoxerRequest {
    pub fn validate(self) -> ValidationResult<NewBoxer> {
        NewBoxer::new(self.name, self.weight, self.height, self.reach, self.age)
    }
}

/// Boxer as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxerResponse {
    pub id: BoxerId,
    pub name: String,
    pub weight: i64,
    pub height: i64,
    pub reach: f64,
    pub age: i64,
    pub weight_class: WeightClass,
}

impl BoxerResponse {
    pub fn from_boxer(boxer: &Boxer) -> ValidationResult<Self> {
        Ok(Self {
            id: boxer.id(),
            name: boxer.name().to_string(),
            weight: boxer.weight(),
            height: boxer.height(),
            reach: boxer.reach(),
            age: boxer.age(),
            weight_class: boxer.weight_class()?,
        })
    }
}

/// Record a single fight result against a boxer
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatsRequest {
    /// `"win"` or `"loss"`
    pub result: String,
}
