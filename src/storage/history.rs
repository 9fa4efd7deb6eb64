//! Scan History
//!
//! Most-recent-first log of completed scans, capped and de-duplicated by
//! normalized pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::{read_json_or_default, write_json, KeyValueStore, HISTORY_KEY};
use crate::error::LabResult;
use crate::oracle::{BloodType, CompatibilityResult};

/// Default number of scans kept
pub const DEFAULT_HISTORY_LIMIT: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub subject_a: String,
    pub subject_b: String,
    pub blood_type_a: BloodType,
    pub blood_type_b: BloodType,
    pub overall_score: u8,
    pub timestamp: DateTime<Utc>,
    pub result: CompatibilityResult,
}

impl HistoryEntry {
    pub fn from_result(result: &CompatibilityResult) -> Self {
        Self {
            subject_a: result.subject_a.clone(),
            subject_b: result.subject_b.clone(),
            blood_type_a: result.blood_type_a,
            blood_type_b: result.blood_type_b,
            overall_score: result.overall_score,
            timestamp: result.generated_at,
            result: result.clone(),
        }
    }

    pub fn pair_key(&self) -> String {
        self.result.pair().key()
    }
}

#[derive(Clone)]
pub struct HistoryLog {
    store: Arc<dyn KeyValueStore>,
    limit: usize,
}

impl HistoryLog {
    pub fn new(store: Arc<dyn KeyValueStore>, limit: usize) -> Self {
        Self {
            store,
            limit: limit.max(1),
        }
    }

    /// All entries, most recent first
    pub async fn entries(&self) -> Vec<HistoryEntry> {
        read_json_or_default(self.store.as_ref(), HISTORY_KEY).await
    }

    pub async fn get(&self, index: usize) -> Option<HistoryEntry> {
        self.entries().await.into_iter().nth(index)
    }

    /// Move-to-front upsert of a completed scan.
    pub async fn record(&self, result: &CompatibilityResult) -> LabResult<()> {
        let entry = HistoryEntry::from_result(result);
        let key = entry.pair_key();

        let mut entries = self.entries().await;
        entries.retain(|existing| existing.pair_key() != key);
        entries.insert(0, entry);
        entries.truncate(self.limit);

        write_json(self.store.as_ref(), HISTORY_KEY, &entries).await?;
        debug!("Recorded scan for '{}' ({} in history)", key, entries.len());
        Ok(())
    }

    pub async fn clear(&self) -> LabResult<()> {
        self.store.remove(HISTORY_KEY).await
    }
}
