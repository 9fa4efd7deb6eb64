//! Lab Property Suite
//!
//! End-to-end checks of the generator, cache and history through the public
//! `CompatibilityLab` API, against both storage backends.

use std::sync::Arc;

use labx_scanner::oracle::{BloodType, MessagePicker, NamePair, ResultSnapshot};
use labx_scanner::storage::{JsonFileStore, KeyValueStore, MemoryStore, CACHE_KEY, HISTORY_KEY};
use labx_scanner::CompatibilityLab;
use tempfile::tempdir;

struct FirstMessage;

impl MessagePicker for FirstMessage {
    fn pick(&self, _len: usize) -> usize {
        0
    }
}

fn memory_lab() -> CompatibilityLab {
    CompatibilityLab::new(Arc::new(MemoryStore::new()), 15)
}

#[tokio::test]
async fn test_generate_twice_yields_identical_numbers() {
    let lab = memory_lab();
    let first = lab.generate("Ann", "Ben").await;
    let second = lab.generate("Ann", "Ben").await;

    assert_eq!(first.snapshot(), second.snapshot());
    assert_eq!(first.blood_type_a, second.blood_type_a);
    assert_eq!(first.insights[0], second.insights[0]);
    assert_eq!(first.insights[2], second.insights[2]);
}

#[tokio::test]
async fn test_fixed_picker_makes_insights_fully_stable() {
    let lab = CompatibilityLab::with_picker(Arc::new(MemoryStore::new()), 15, Arc::new(FirstMessage));
    let first = lab.generate("Ann", "Ben").await;
    let second = lab.generate("Ann", "Ben").await;
    assert_eq!(first.insights, second.insights);
}

#[tokio::test]
async fn test_determinism_survives_restart_and_clear() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("labx_storage.json");

    let original = {
        let lab = CompatibilityLab::new(Arc::new(JsonFileStore::new(&path)), 15);
        lab.generate("Ann", "Ben").await
    };

    // New process over the same file sees the cached entry
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(&path));
    let lab = CompatibilityLab::new(store.clone(), 15);
    assert_eq!(lab.cache().get("ann|ben").await, Some(original.snapshot()));

    lab.clear_history().await.unwrap();
    assert!(store.get(CACHE_KEY).await.unwrap().is_none());

    let regenerated = lab.generate("Ann", "Ben").await;
    assert_eq!(regenerated.snapshot(), original.snapshot());
    assert_eq!(regenerated.snapshot(), ResultSnapshot::derive(&NamePair::new("Ann", "Ben")));
}

#[tokio::test]
async fn test_pair_order_uses_distinct_keys() {
    let lab = memory_lab();
    let forward = lab.generate("Ann", "Ben").await;
    let reverse = lab.generate("Ben", "Ann").await;

    // Same individuals keep their own blood types
    assert_eq!(forward.blood_type_a, reverse.blood_type_b);
    assert_eq!(forward.blood_type_b, reverse.blood_type_a);

    assert!(lab.cache().get("ann|ben").await.is_some());
    assert!(lab.cache().get("ben|ann").await.is_some());
    assert_eq!(lab.cache().len().await, 2);
}

#[tokio::test]
async fn test_all_metrics_are_clamped() {
    let lab = memory_lab();
    let names = ["Ann", "Ben", "Cleo", "Dmitri", "Eve", "Fatima", "Guo", "Hana", "Ian", "Jo"];
    for a in names {
        for b in names {
            let result = lab.generate(a, b).await;
            for value in [
                result.affinity,
                result.trust,
                result.emotional_sync,
                result.long_term_potential,
                result.passion_index,
                result.overall_score,
            ] {
                assert!(value <= 100, "{a}/{b} produced {value}");
            }
            assert_eq!(result.insights.len(), 3);
        }
    }
}

#[tokio::test]
async fn test_blood_type_ignores_pairing() {
    let lab = memory_lab();
    let with_ben = lab.generate("Ann", "Ben").await;
    let with_cat = lab.generate("ann", "Cat").await;

    assert_eq!(with_ben.blood_type_a, with_cat.blood_type_a);
    assert_eq!(with_ben.blood_type_a, BloodType::for_name("ann"));
    assert!(BloodType::ALL.contains(&with_ben.blood_type_a));
}

#[tokio::test]
async fn test_history_keeps_fifteen_most_recent() {
    let lab = memory_lab();
    let names: Vec<String> = (0..16).map(|i| format!("Subject {}", (b'a' + i as u8) as char)).collect();

    for name in &names {
        let result = lab.generate(name, "Partner").await;
        lab.record_history(&result).await.unwrap();
    }

    let history = lab.history().await;
    assert_eq!(history.len(), 15);
    assert_eq!(history[0].subject_a, names[15]);
    assert_eq!(history[14].subject_a, names[1]);
    assert!(history.iter().all(|entry| entry.subject_a != names[0]));
}

#[tokio::test]
async fn test_history_moves_repeat_scan_to_front() {
    let lab = memory_lab();
    for (a, b) in [("Ann", "Ben"), ("Cat", "Dan"), ("Eve", "Fox")] {
        let result = lab.generate(a, b).await;
        lab.record_history(&result).await.unwrap();
    }

    let repeat = lab.generate("ann", "BEN").await;
    lab.record_history(&repeat).await.unwrap();

    let history = lab.history().await;
    let pairs: Vec<_> = history
        .iter()
        .map(|e| format!("{}|{}", e.subject_a, e.subject_b))
        .collect();
    assert_eq!(pairs, vec!["ann|BEN", "Eve|Fox", "Cat|Dan"]);
    assert_eq!(history[0].overall_score, repeat.overall_score);
}

#[tokio::test]
async fn test_clear_history_wipes_both_records() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let lab = CompatibilityLab::new(store.clone(), 15);

    let result = lab.generate("Ann", "Ben").await;
    lab.record_history(&result).await.unwrap();
    assert!(store.get(HISTORY_KEY).await.unwrap().is_some());

    lab.clear_history().await.unwrap();
    assert!(lab.history().await.is_empty());
    assert!(lab.cache().get("ann|ben").await.is_none());

    assert_eq!(lab.generate("Ann", "Ben").await.snapshot(), result.snapshot());
}

#[tokio::test]
async fn test_corrupt_storage_reads_as_empty() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    store.set(HISTORY_KEY, "not json".into()).await.unwrap();
    store.set(CACHE_KEY, "[1,2,3]".into()).await.unwrap();

    let lab = CompatibilityLab::new(store, 15);
    assert!(lab.history().await.is_empty());

    let result = lab.generate("Ann", "Ben").await;
    assert_eq!(result.snapshot(), ResultSnapshot::derive(&NamePair::new("Ann", "Ben")));
    lab.record_history(&result).await.unwrap();
    assert_eq!(lab.history().await.len(), 1);
}
