//! Result Cache
//!
//! Persistent map from pair key to the stable part of a result. Entries are
//! written once and never updated; the only removal is a full clear.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::{read_json_or_default, write_json, KeyValueStore, CACHE_KEY};
use crate::error::LabResult;
use crate::oracle::ResultSnapshot;

type SnapshotMap = HashMap<String, ResultSnapshot>;

/// A cache for derived result snapshots
#[derive(Clone)]
pub struct ResultCache {
    store: Arc<dyn KeyValueStore>,
}

impl ResultCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn load(&self) -> SnapshotMap {
        read_json_or_default(self.store.as_ref(), CACHE_KEY).await
    }

    pub async fn get(&self, pair_key: &str) -> Option<ResultSnapshot> {
        self.load().await.get(pair_key).map(|snapshot| snapshot.clamped())
    }

    /// Store a snapshot unless the key already has one. Returns whether the
    /// entry was written.
    pub async fn insert(&self, pair_key: &str, snapshot: ResultSnapshot) -> LabResult<bool> {
        let mut snapshots = self.load().await;
        if snapshots.contains_key(pair_key) {
            return Ok(false);
        }

        snapshots.insert(pair_key.to_string(), snapshot);
        write_json(self.store.as_ref(), CACHE_KEY, &snapshots).await?;
        debug!("Cached snapshot for '{}' ({} entries)", pair_key, snapshots.len());
        Ok(true)
    }

    pub async fn len(&self) -> usize {
        self.load().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) -> LabResult<()> {
        self.store.remove(CACHE_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{BloodType, NamePair};
    use crate::storage::MemoryStore;

    fn snapshot(score: u8) -> ResultSnapshot {
        ResultSnapshot {
            blood_type_a: BloodType::APositive,
            blood_type_b: BloodType::BPositive,
            affinity: score,
            trust: score,
            emotional_sync: score,
            long_term_potential: score,
            passion_index: score,
            overall_score: score,
        }
    }

    #[tokio::test]
    async fn test_cache_get_insert() {
        let cache = ResultCache::new(Arc::new(MemoryStore::new()));
        let key = NamePair::new("Ann", "Ben").key();

        assert!(cache.get(&key).await.is_none());
        assert!(cache.insert(&key, snapshot(40)).await.unwrap());
        assert_eq!(cache.get(&key).await, Some(snapshot(40)));
    }

    #[tokio::test]
    async fn test_cache_entries_are_never_overwritten() {
        let cache = ResultCache::new(Arc::new(MemoryStore::new()));

        cache.insert("ann|ben", snapshot(40)).await.unwrap();
        assert!(!cache.insert("ann|ben", snapshot(90)).await.unwrap());
        assert_eq!(cache.get("ann|ben").await.unwrap().overall_score, 40);
    }

    #[tokio::test]
    async fn test_cache_clear() {
        let cache = ResultCache::new(Arc::new(MemoryStore::new()));
        cache.insert("a|b", snapshot(1)).await.unwrap();
        cache.insert("c|d", snapshot(2)).await.unwrap();
        assert_eq!(cache.len().await, 2);

        cache.clear().await.unwrap();
        assert!(cache.is_empty().await);
        assert!(cache.get("a|b").await.is_none());
    }
}
