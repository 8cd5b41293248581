//! Application state shared across handlers

use std::sync::Arc;

use ringside_arena::{Leaderboard, RandomSource, Ring};
use ringside_db::MemoryBoxerStore;
use ringside_types::BoxerStore;
use tokio::sync::Mutex;

/// Shared application state
pub struct AppState {
    /// Boxer records
    pub store: Arc<dyn BoxerStore>,
    /// The single ring; held for the whole of each ring operation
    pub ring: Mutex<Ring>,
    /// Leaderboard over the same store
    pub leaderboard: Leaderboard,
}

impl AppState {
    /// Create a new application state
    pub fn new(store: Arc<dyn BoxerStore>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            ring: Mutex::new(Ring::new(store.clone(), random)),
            leaderboard: Leaderboard::new(store.clone()),
            store,
        }
    }

    /// State backed by an empty in-memory store
    pub fn in_memory(random: Arc<dyn RandomSource>) -> Self {
        Self::new(Arc::new(MemoryBoxerStore::new()), random)
    }
}
