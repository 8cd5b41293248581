//! Ringside Arena - Fight resolution and rankings
//!
//! # Features
//!
//! - **Ring**: holds two boxers, scores them and resolves the fight with
//!   one random sample, then records a win and a loss
//! - **Leaderboard**: ranks boxers with at least one fight by wins or by
//!   win percentage
//! - **Randomness**: random.org client plus a scripted source
//!
//! Every component receives its store and randomness source at
//! construction; nothing is read from globals.
//!
//! # Example
//!
//! ```ignore
//! use ringside_arena::{Ring, RandomOrgClient, RandomOrgConfig};
//!
//! let random = Arc::new(RandomOrgClient::new(RandomOrgConfig::from_env())?);
//! let mut ring = Ring::new(store.clone(), random);
//!
//! ring.enter_by_name("Ali").await?;
//! ring.enter_by_name("Frazier").await?;
//! let result = ring.fight().await?;
//! println!("{} wins", result.winner_name());
//! ```

pub mod error;
pub mod leaderboard;
pub mod random;
pub mod ring;

pub use error::{ArenaError, ArenaResult};
pub use leaderboard::{Leaderboard, LeaderboardEntry, LeaderboardSort};
pub use random::{
    RandomError, RandomOrgClient, RandomOrgConfig, RandomResult, RandomSource, SequenceRandom,
};
pub use ring::{fighting_skill, win_probability, FightResult, Ring, MAX_BOXERS};
