//! Storage Module
//!
//! A string key-value store in the shape of browser local storage, plus the
//! result cache and scan history built on top of it.

pub mod cache;
pub mod file;
pub mod history;

pub use cache::ResultCache;
pub use file::JsonFileStore;
pub use history::{HistoryEntry, HistoryLog};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::warn;

use crate::error::LabResult;

/// Key under which the scan history is stored
pub const HISTORY_KEY: &str = "labxScanHistory";
/// Key under which cached result snapshots are stored
pub const CACHE_KEY: &str = "labxResultCache";

/// Trait for string key-value stores backing the lab
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value for a key
    async fn get(&self, key: &str) -> LabResult<Option<String>>;

    /// Overwrite the value for a key
    async fn set(&self, key: &str, value: String) -> LabResult<()>;

    /// Delete a key if present
    async fn remove(&self, key: &str) -> LabResult<()>;
}

/// Ephemeral in-process store
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> LabResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> LabResult<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> LabResult<()> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

/// Read a JSON value, treating missing, unreadable or corrupt data as empty.
pub(crate) async fn read_json_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            warn!("Failed to read '{}' from storage, treating as empty: {}", key, e);
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Discarding corrupt '{}' record: {}", key, e);
            T::default()
        }
    }
}

pub(crate) async fn write_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> LabResult<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, json).await
}
