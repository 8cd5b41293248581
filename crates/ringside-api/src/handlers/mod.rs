//! API Handlers
//!
//! Request handlers for all API endpoints.

pub mod boxer;
pub mod health;
pub mod leaderboard;
pub mod ring;

pub use health::*;
