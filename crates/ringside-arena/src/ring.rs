//! The ring
//!
//! Holds up to two boxers and resolves a fight between them:
//!
//! 1. `skill = weight × name length + reach / 10 + age modifier`
//! 2. `probability = 1 / (1 + e^(−|skill₁ − skill₂|))`
//! 3. one sample `s` from the randomness source; `s < probability` means
//!    the first boxer to enter wins
//! 4. one `win` and one `loss` stat update, then the ring is emptied
//!
//! The probability never drops below 0.5, so the first boxer in is always
//! the favourite. Callers sharing a ring must serialize access to it.

use std::sync::Arc;

use ringside_types::{Boxer, BoxerStore, FightOutcome};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::{ArenaError, ArenaResult};
use crate::random::RandomSource;

/// Ring capacity
pub const MAX_BOXERS: usize = 2;

/// Age below which a boxer loses a skill point
pub const YOUNG_AGE: i64 = 25;
/// Age above which a boxer loses two skill points
pub const VETERAN_AGE: i64 = 35;

/// Fighting skill of a single boxer
pub fn fighting_skill(boxer: &Boxer) -> f64 {
    let age_modifier = if boxer.age() < YOUNG_AGE {
        -1.0
    } else if boxer.age() > VETERAN_AGE {
        -2.0
    } else {
        0.0
    };
    let name_len = boxer.name().chars().count() as f64;

    boxer.weight() as f64 * name_len + boxer.reach() / 10.0 + age_modifier
}

/// Probability that the first boxer wins, given both skills
pub fn win_probability(skill_1: f64, skill_2: f64) -> f64 {
    let delta = (skill_1 - skill_2).abs();
    1.0 / (1.0 + (-delta).exp())
}

/// Outcome of a resolved fight
#[derive(Debug, Clone, Serialize)]
pub struct FightResult {
    pub winner: Boxer,
    pub loser: Boxer,
    pub winner_skill: f64,
    pub loser_skill: f64,
    /// Probability that the first boxer in the ring would win
    pub probability: f64,
    /// Sample drawn from the randomness source
    pub sample: f64,
}

impl FightResult {
    pub fn winner_name(&self) -> &str {
        self.winner.name()
    }
}

/// Contest engine holding at most two boxers
pub struct Ring {
    members: Vec<Boxer>,
    store: Arc<dyn BoxerStore>,
    random: Arc<dyn RandomSource>,
}

impl Ring {
    pub fn new(store: Arc<dyn BoxerStore>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            members: Vec::with_capacity(MAX_BOXERS),
            store,
            random,
        }
    }

    /// Add a boxer to the ring
    pub fn enter(&mut self, boxer: Boxer) -> ArenaResult<()> {
        if self.members.len() >= MAX_BOXERS {
            warn!(boxer = %boxer.name(), "Ring is full");
            return Err(ArenaError::RingFull);
        }

        info!(boxer_id = %boxer.id(), boxer = %boxer.name(), "Boxer entered the ring");
        self.members.push(boxer);
        Ok(())
    }

    /// Look a boxer up by name and add it to the ring
    pub async fn enter_by_name(&mut self, name: &str) -> ArenaResult<Boxer> {
        let boxer = self.store.get_boxer_by_name(name).await?;
        self.enter(boxer.clone())?;
        Ok(boxer)
    }

    /// Resolve a fight between the two boxers in the ring
    ///
    /// Fails without touching the ring when it is not full or when the
    /// random sample cannot be drawn. Once a sample is drawn both stat
    /// updates are attempted and the ring is emptied, even if an update
    /// fails; the first update error is returned.
    pub async fn fight(&mut self) -> ArenaResult<FightResult> {
        if self.members.len() < MAX_BOXERS {
            warn!(found = self.members.len(), "Not enough boxers to fight");
            return Err(ArenaError::NotEnoughBoxers {
                found: self.members.len(),
            });
        }

        let skill_1 = fighting_skill(&self.members[0]);
        let skill_2 = fighting_skill(&self.members[1]);
        let probability = win_probability(skill_1, skill_2);

        let sample = self.random.sample().await.map_err(|e| {
            error!(error = %e, "Fight aborted, no random sample");
            e
        })?;

        let first_wins = sample < probability;
        let (winner_idx, loser_idx) = if first_wins { (0, 1) } else { (1, 0) };
        let winner = self.members[winner_idx].clone();
        let loser = self.members[loser_idx].clone();
        let (winner_skill, loser_skill) = if first_wins {
            (skill_1, skill_2)
        } else {
            (skill_2, skill_1)
        };

        info!(
            winner = %winner.name(),
            loser = %loser.name(),
            probability,
            sample,
            "Fight resolved"
        );

        let win = self.store.update_stats(winner.id(), FightOutcome::Win).await;
        let loss = self.store.update_stats(loser.id(), FightOutcome::Loss).await;
        self.clear();

        for (id, result) in [(winner.id(), &win), (loser.id(), &loss)] {
            if let Err(e) = result {
                error!(boxer_id = %id, error = %e, "Failed to record fight");
            }
        }
        win?;
        loss?;

        Ok(FightResult {
            winner,
            loser,
            winner_skill,
            loser_skill,
            probability,
            sample,
        })
    }

    /// Empty the ring; a no-op when already empty
    pub fn clear(&mut self) {
        if self.members.is_empty() {
            return;
        }
        info!("Clearing the ring");
        self.members.clear();
    }

    /// Snapshot of the boxers in the ring, in entry order
    pub fn boxers(&self) -> Vec<Boxer> {
        self.members.clone()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{RandomError, SequenceRandom};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use ringside_db::MemoryBoxerStore;
    use ringside_types::{BoxerId, BoxerRecord, NewBoxer, StoreError, StoreResult};

    /// Memory store that records every stats update
    #[derive(Default)]
    struct RecordingStore {
        inner: MemoryBoxerStore,
        updates: Mutex<Vec<(BoxerId, FightOutcome)>>,
    }

    #[async_trait]
    impl BoxerStore for RecordingStore {
        async fn create_boxer(&self, boxer: &NewBoxer) -> StoreResult<Boxer> {
            self.inner.create_boxer(boxer).await
        }

        async fn delete_boxer(&self, id: BoxerId) -> StoreResult<()> {
            self.inner.delete_boxer(id).await
        }

        async fn get_boxer_by_id(&self, id: BoxerId) -> StoreResult<Boxer> {
            self.inner.get_boxer_by_id(id).await
        }

        async fn get_boxer_by_name(&self, name: &str) -> StoreResult<Boxer> {
            self.inner.get_boxer_by_name(name).await
        }

        async fn update_stats(&self, id: BoxerId, outcome: FightOutcome) -> StoreResult<()> {
            self.updates.lock().push((id, outcome));
            self.inner.update_stats(id, outcome).await
        }

        async fn list_with_fights(&self) -> StoreResult<Vec<BoxerRecord>> {
            self.inner.list_with_fights().await
        }

        async fn health_check(&self) -> StoreResult<()> {
            Ok(())
        }
    }

    struct Fixture {
        store: Arc<RecordingStore>,
        random: Arc<SequenceRandom>,
        ring: Ring,
    }

    fn fixture(samples: &[f64]) -> Fixture {
        let store = Arc::new(RecordingStore::default());
        let random = Arc::new(SequenceRandom::new(samples.iter().copied()));
        let ring = Ring::new(store.clone(), random.clone());
        Fixture {
            store,
            random,
            ring,
        }
    }

    async fn create(
        store: &RecordingStore,
        name: &str,
        weight: i64,
        reach: f64,
        age: i64,
    ) -> Boxer {
        let new = NewBoxer::new(name, weight, 70, reach, age).unwrap();
        store.create_boxer(&new).await.unwrap()
    }

    fn standalone(name: &str, weight: i64, reach: f64, age: i64) -> Boxer {
        NewBoxer::new(name, weight, 70, reach, age)
            .unwrap()
            .into_boxer(BoxerId(1))
    }

    #[test]
    fn test_fighting_skill() {
        let boxer = standalone("Boxer Ali", 150, 72.2, 21);
        assert!((fighting_skill(&boxer) - 1356.22).abs() < 1e-9);

        let boxer = standalone("Boxer Bob", 180, 77.5, 24);
        assert!((fighting_skill(&boxer) - 1627.75).abs() < 1e-9);

        // 30 is in the neutral band, 36 is a veteran
        let prime = standalone("Ali", 200, 80.0, 30);
        assert_eq!(fighting_skill(&prime), 608.0);
        let veteran = standalone("Ali", 200, 80.0, 36);
        assert_eq!(fighting_skill(&veteran), 606.0);
    }

    #[test]
    fn test_fighting_skill_counts_characters() {
        let boxer = standalone("Renée", 130, 70.0, 30);
        assert_eq!(fighting_skill(&boxer), 130.0 * 5.0 + 7.0);
    }

    #[test]
    fn test_fighting_skill_is_deterministic() {
        let boxer = standalone("Tyson", 220, 71.0, 29);
        assert_eq!(fighting_skill(&boxer), fighting_skill(&boxer));
    }

    #[test]
    fn test_win_probability() {
        assert_eq!(win_probability(500.0, 500.0), 0.5);
        assert_eq!(win_probability(1356.22, 1627.75), 1.0);

        let close = win_probability(10.0, 11.0);
        assert_eq!(close, win_probability(11.0, 10.0));
        assert!(close > 0.5 && close < 1.0);
    }

    #[tokio::test]
    async fn test_enter_preserves_order_and_capacity() {
        let mut f = fixture(&[]);
        let a = create(&f.store, "A", 150, 70.0, 30).await;
        let b = create(&f.store, "B", 150, 70.0, 30).await;
        let c = create(&f.store, "C", 150, 70.0, 30).await;

        f.ring.enter(a.clone()).unwrap();
        f.ring.enter(b.clone()).unwrap();
        assert_eq!(f.ring.boxers(), vec![a.clone(), b.clone()]);

        let err = f.ring.enter(c).unwrap_err();
        assert!(matches!(err, ArenaError::RingFull));
        assert_eq!(f.ring.boxers(), vec![a, b]);
    }

    #[tokio::test]
    async fn test_snapshot_is_detached() {
        let mut f = fixture(&[]);
        let a = create(&f.store, "A", 150, 70.0, 30).await;
        f.ring.enter(a).unwrap();

        let mut snapshot = f.ring.boxers();
        snapshot.clear();
        assert_eq!(f.ring.len(), 1);
    }

    #[tokio::test]
    async fn test_fight_needs_two_boxers() {
        let mut f = fixture(&[0.5]);

        let err = f.ring.fight().await.unwrap_err();
        assert!(matches!(err, ArenaError::NotEnoughBoxers { found: 0 }));

        let a = create(&f.store, "A", 150, 70.0, 30).await;
        f.ring.enter(a.clone()).unwrap();
        let err = f.ring.fight().await.unwrap_err();
        assert!(matches!(err, ArenaError::NotEnoughBoxers { found: 1 }));

        assert_eq!(f.ring.boxers(), vec![a]);
        assert!(f.store.updates.lock().is_empty());
        assert_eq!(f.random.remaining(), 1);
    }

    #[tokio::test]
    async fn test_saturated_probability_favours_first_boxer() {
        for sample in [0.0, 0.5, 0.99] {
            let mut f = fixture(&[sample]);
            let a = create(&f.store, "Boxer Ali", 150, 72.2, 21).await;
            let b = create(&f.store, "Boxer Bob", 180, 77.5, 24).await;

            f.ring.enter(b.clone()).unwrap();
            f.ring.enter(a.clone()).unwrap();

            let result = f.ring.fight().await.unwrap();
            assert_eq!(result.winner_name(), "Boxer Bob");
            assert_eq!(result.loser.id(), a.id());
            assert_eq!(result.probability, 1.0);
            assert!(f.ring.is_empty());
        }
    }

    #[tokio::test]
    async fn test_equal_skills_split_at_half() {
        let mut f = fixture(&[0.49, 0.5]);
        let a = create(&f.store, "AAA", 150, 70.0, 30).await;
        let b = create(&f.store, "BBB", 150, 70.0, 30).await;

        f.ring.enter(a.clone()).unwrap();
        f.ring.enter(b.clone()).unwrap();
        let result = f.ring.fight().await.unwrap();
        assert_eq!(result.probability, 0.5);
        assert_eq!(result.winner.id(), a.id());

        f.ring.enter(a.clone()).unwrap();
        f.ring.enter(b.clone()).unwrap();
        let result = f.ring.fight().await.unwrap();
        assert_eq!(result.winner.id(), b.id());
    }

    #[tokio::test]
    async fn test_fight_records_one_win_and_one_loss() {
        let mut f = fixture(&[0.3]);
        let a = create(&f.store, "AAA", 150, 70.0, 30).await;
        let b = create(&f.store, "BBB", 150, 70.0, 30).await;

        f.ring.enter(a.clone()).unwrap();
        f.ring.enter(b.clone()).unwrap();
        f.ring.fight().await.unwrap();

        let updates = f.store.updates.lock().clone();
        assert_eq!(
            updates,
            vec![(a.id(), FightOutcome::Win), (b.id(), FightOutcome::Loss)]
        );

        let records = f.store.list_with_fights().await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.fights == 1));
        assert_eq!(records.iter().map(|r| r.wins).sum::<i64>(), 1);
    }

    #[tokio::test]
    async fn test_random_failure_keeps_ring() {
        let mut f = fixture(&[]);
        f.random.push_error(RandomError::Timeout);
        let a = create(&f.store, "A", 150, 70.0, 30).await;
        let b = create(&f.store, "B", 150, 70.0, 30).await;
        f.ring.enter(a).unwrap();
        f.ring.enter(b).unwrap();

        let err = f.ring.fight().await.unwrap_err();
        assert!(matches!(err, ArenaError::Random(RandomError::Timeout)));
        assert_eq!(f.ring.len(), 2);
        assert!(f.store.updates.lock().is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_still_clears_ring() {
        let mut f = fixture(&[0.1]);
        let a = create(&f.store, "AAA", 150, 70.0, 30).await;
        let b = create(&f.store, "BBB", 150, 70.0, 30).await;
        f.ring.enter(a.clone()).unwrap();
        f.ring.enter(b.clone()).unwrap();

        // The winner disappears from the store while in the ring
        f.store.delete_boxer(a.id()).await.unwrap();

        let err = f.ring.fight().await.unwrap_err();
        assert!(matches!(err, ArenaError::Store(StoreError::NotFound(_))));
        assert!(f.ring.is_empty());

        // The loser's update was still attempted and applied
        assert_eq!(f.store.updates.lock().len(), 2);
        let records = f.store.list_with_fights().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].boxer.id(), b.id());
        assert_eq!(records[0].wins, 0);
    }

    #[tokio::test]
    async fn test_enter_by_name() {
        let mut f = fixture(&[]);
        let a = create(&f.store, "Ali", 150, 70.0, 30).await;

        let entered = f.ring.enter_by_name("Ali").await.unwrap();
        assert_eq!(entered, a);

        let err = f.ring.enter_by_name("Nobody").await.unwrap_err();
        assert!(matches!(err, ArenaError::Store(StoreError::NotFound(_))));
        assert_eq!(f.ring.len(), 1);
    }

    #[tokio::test]
    async fn test_enter_by_padded_name() {
        let mut f = fixture(&[]);
        let a = create(&f.store, " Ali ", 150, 70.0, 30).await;
        assert_eq!(a.name(), "Ali");

        let entered = f.ring.enter_by_name(" Ali ").await.unwrap();
        assert_eq!(entered, a);
        assert_eq!(f.ring.boxers(), vec![a]);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let mut f = fixture(&[]);
        f.ring.clear();
        assert!(f.ring.is_empty());

        let a = create(&f.store, "A", 150, 70.0, 30).await;
        f.ring.enter(a).unwrap();
        f.ring.clear();
        f.ring.clear();
        assert!(f.ring.is_empty());
    }
}
