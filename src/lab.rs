//! Compatibility Lab
//!
//! The single entry point front-ends use: generate a result, record it in
//! history, list or clear history. Clearing history also wipes the result
//! cache.
//!
//! Both records are read-modify-write cycles over the store, so every write
//! path goes through one lab-wide lock.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::LabConfig;
use crate::error::LabResult;
use crate::oracle::{CompatibilityResult, MessagePicker, ResultGenerator};
use crate::storage::{HistoryEntry, HistoryLog, JsonFileStore, KeyValueStore, ResultCache};

pub struct CompatibilityLab {
    generator: ResultGenerator,
    history: HistoryLog,
    write_lock: Mutex<()>,
}

impl CompatibilityLab {
    pub fn new(store: Arc<dyn KeyValueStore>, history_limit: usize) -> Self {
        Self {
            generator: ResultGenerator::new(ResultCache::new(store.clone())),
            history: HistoryLog::new(store, history_limit),
            write_lock: Mutex::new(()),
        }
    }

    /// Lab backed by the storage file named in `config`.
    pub fn from_config(config: &LabConfig) -> Self {
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(&config.storage_path));
        Self::new(store, config.history_limit)
    }

    /// Replace the flavor-text picker (deterministic pickers in tests).
    pub fn with_picker(store: Arc<dyn KeyValueStore>, history_limit: usize, picker: Arc<dyn MessagePicker>) -> Self {
        Self {
            generator: ResultGenerator::with_picker(ResultCache::new(store.clone()), picker),
            history: HistoryLog::new(store, history_limit),
            write_lock: Mutex::new(()),
        }
    }

    pub async fn generate(&self, subject_a: &str, subject_b: &str) -> CompatibilityResult {
        let _guard = self.write_lock.lock().await;
        self.generator.generate(subject_a, subject_b).await
    }

    pub async fn record_history(&self, result: &CompatibilityResult) -> LabResult<()> {
        let _guard = self.write_lock.lock().await;
        self.history.record(result).await
    }

    /// Empty the history and invalidate every cached snapshot.
    /// The cache is cleared first; if that fails the history is untouched.
    pub async fn clear_history(&self) -> LabResult<()> {
        let _guard = self.write_lock.lock().await;
        self.generator.cache().clear().await?;
        self.history.clear().await?;
        info!("🧹 Cleared scan history and result cache");
        Ok(())
    }

    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.history.entries().await
    }

    pub async fn entry(&self, index: usize) -> Option<HistoryEntry> {
        self.history.get(index).await
    }

    pub fn cache(&self) -> &ResultCache {
        self.generator.cache()
    }
}
