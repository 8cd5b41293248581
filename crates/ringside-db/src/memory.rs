//! In-memory boxer store
//!
//! Same contract as the SQLite repository: names are unique, ids are never
//! reused and stats updates happen under a single write lock.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use ringside_types::{
    Boxer, BoxerId, BoxerRecord, BoxerStore, FightOutcome, NewBoxer, StoreError, StoreResult,
};
use tracing::{debug, info};

#[derive(Default)]
struct Inner {
    last_id: i64,
    records: BTreeMap<BoxerId, BoxerRecord>,
}

/// Boxer store held entirely in process memory
#[derive(Default)]
pub struct MemoryBoxerStore {
    inner: RwLock<Inner>,
}

impl MemoryBoxerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored boxers
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BoxerStore for MemoryBoxerStore {
    async fn create_boxer(&self, boxer: &NewBoxer) -> StoreResult<Boxer> {
        let mut inner = self.inner.write();

        if inner
            .records
            .values()
            .any(|r| r.boxer.name() == boxer.name())
        {
            return Err(StoreError::duplicate_name(boxer.name()));
        }

        inner.last_id += 1;
        let id = BoxerId(inner.last_id);
        let created = boxer.clone().into_boxer(id);
        inner.records.insert(
            id,
            BoxerRecord {
                boxer: created.clone(),
                fights: 0,
                wins: 0,
            },
        );

        info!(%id, name = %created.name(), "Boxer created");
        Ok(created)
    }

    async fn delete_boxer(&self, id: BoxerId) -> StoreResult<()> {
        match self.inner.write().records.remove(&id) {
            Some(_) => {
                info!(%id, "Boxer deleted");
                Ok(())
            }
            None => Err(StoreError::boxer_id_not_found(id)),
        }
    }

    async fn get_boxer_by_id(&self, id: BoxerId) -> StoreResult<Boxer> {
        self.inner
            .read()
            .records
            .get(&id)
            .map(|r| r.boxer.clone())
            .ok_or_else(|| StoreError::boxer_id_not_found(id))
    }

    async fn get_boxer_by_name(&self, name: &str) -> StoreResult<Boxer> {
        let name = name.trim();
        self.inner
            .read()
            .records
            .values()
            .find(|r| r.boxer.name() == name)
            .map(|r| r.boxer.clone())
            .ok_or_else(|| StoreError::boxer_name_not_found(name))
    }

    async fn update_stats(&self, id: BoxerId, outcome: FightOutcome) -> StoreResult<()> {
        let mut inner = self.inner.write();
        let record = inner
            .records
            .get_mut(&id)
            .ok_or_else(|| StoreError::boxer_id_not_found(id))?;

        record.fights += 1;
        record.wins += outcome.win_increment();

        debug!(%id, %outcome, fights = record.fights, wins = record.wins, "Stats updated");
        Ok(())
    }

    async fn list_with_fights(&self) -> StoreResult<Vec<BoxerRecord>> {
        Ok(self
            .inner
            .read()
            .records
            .values()
            .filter(|r| r.fights > 0)
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_boxer(name: &str) -> NewBoxer {
        NewBoxer::new(name, 180, 70, 71.0, 30).unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = MemoryBoxerStore::new();
        let a = store.create_boxer(&new_boxer("A")).await.unwrap();
        let b = store.create_boxer(&new_boxer("B")).await.unwrap();
        assert_eq!(a.id(), BoxerId(1));
        assert_eq!(b.id(), BoxerId(2));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = MemoryBoxerStore::new();
        let a = store.create_boxer(&new_boxer("A")).await.unwrap();
        store.delete_boxer(a.id()).await.unwrap();
        assert!(store.is_empty());

        let b = store.create_boxer(&new_boxer("A")).await.unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test]
    async fn test_duplicate_name() {
        let store = MemoryBoxerStore::new();
        store.create_boxer(&new_boxer("Ali")).await.unwrap();
        let err = store.create_boxer(&new_boxer("Ali")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_and_not_found() {
        let store = MemoryBoxerStore::new();
        let ali = store.create_boxer(&new_boxer("Ali")).await.unwrap();

        assert_eq!(store.get_boxer_by_name("Ali").await.unwrap(), ali);
        assert_eq!(store.get_boxer_by_name("  Ali ").await.unwrap(), ali);
        assert_eq!(store.get_boxer_by_id(ali.id()).await.unwrap(), ali);

        assert!(matches!(
            store.get_boxer_by_id(BoxerId(42)).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.get_boxer_by_name("ali").await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_boxer(BoxerId(42)).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.update_stats(BoxerId(42), FightOutcome::Win).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_stats_and_listing() {
        let store = MemoryBoxerStore::new();
        let a = store.create_boxer(&new_boxer("A")).await.unwrap();
        let _b = store.create_boxer(&new_boxer("B")).await.unwrap();

        store.update_stats(a.id(), FightOutcome::Win).await.unwrap();
        store.update_stats(a.id(), FightOutcome::Loss).await.unwrap();

        let records = store.list_with_fights().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].boxer.id(), a.id());
        assert_eq!(records[0].fights, 2);
        assert_eq!(records[0].wins, 1);
    }

    #[tokio::test]
    async fn test_concurrent_updates() {
        let store = Arc::new(MemoryBoxerStore::new());
        let id = store.create_boxer(&new_boxer("A")).await.unwrap().id();

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.update_stats(id, FightOutcome::Win).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let records = store.list_with_fights().await.unwrap();
        assert_eq!(records[0].fights, 50);
        assert_eq!(records[0].wins, 50);
    }
}
