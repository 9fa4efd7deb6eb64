//! File-backed key-value store
//!
//! Keeps every key in a single JSON document on disk so separate runs of the
//! lab see the same cache and history.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::KeyValueStore;
use crate::error::LabResult;

/// Default storage file name
pub const STORAGE_FILENAME: &str = "labx_storage.json";

pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(STORAGE_FILENAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> LabResult<BTreeMap<String, String>> {
        if !fs::try_exists(&self.path).await? {
            return Ok(BTreeMap::new());
        }

        let json = fs::read_to_string(&self.path).await?;
        if json.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str(&json) {
            Ok(values) => Ok(values),
            Err(e) => {
                warn!("Storage file {:?} is corrupt, starting empty: {}", self.path, e);
                Ok(BTreeMap::new())
            }
        }
    }

    async fn save(&self, values: &BTreeMap<String, String>) -> LabResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, json).await?;
        debug!("Wrote {} storage keys to {:?}", values.len(), self.path);
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> LabResult<Option<String>> {
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> LabResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.load().await?;
        values.insert(key.to_string(), value);
        self.save(&values).await
    }

    async fn remove(&self, key: &str) -> LabResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.load().await?;
        if values.remove(key).is_some() {
            self.save(&values).await?;
        }
        Ok(())
    }
}
