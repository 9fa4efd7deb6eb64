//! Result Generator
//!
//! Turns a name pair into a [`CompatibilityResult`]. The cache is consulted
//! before anything is derived, so a pair's headline numbers never change
//! once shown.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::insights::{build_insights, MessagePicker, RandomPicker};
use super::result::{CompatibilityResult, NamePair, ResultSnapshot};
use crate::storage::ResultCache;

pub struct ResultGenerator {
    cache: ResultCache,
    picker: Arc<dyn MessagePicker>,
}

impl ResultGenerator {
    pub fn new(cache: ResultCache) -> Self {
        Self::with_picker(cache, Arc::new(RandomPicker))
    }

    pub fn with_picker(cache: ResultCache, picker: Arc<dyn MessagePicker>) -> Self {
        Self { cache, picker }
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Generate (or replay) the result for an ordered pair of names.
    ///
    /// Storage problems never fail generation: an unreadable cache counts as
    /// a miss and a failed write only loses the cache entry.
    pub async fn generate(&self, subject_a: &str, subject_b: &str) -> CompatibilityResult {
        let pair = NamePair::new(subject_a, subject_b);
        let key = pair.key();

        let snapshot = match self.cache.get(&key).await {
            Some(cached) => {
                debug!("Result cache hit for '{}'", key);
                cached
            }
            None => {
                let derived = ResultSnapshot::derive(&pair);
                match self.cache.insert(&key, derived).await {
                    Ok(_) => info!("🧬 Derived new result for '{}' (overall {}%)", key, derived.overall_score),
                    Err(e) => warn!("Failed to cache result for '{}': {}", key, e),
                }
                derived
            }
        };

        let insights = build_insights(snapshot.overall_score, self.picker.as_ref());
        CompatibilityResult::from_snapshot(&pair, snapshot, insights, Utc::now())
    }
}
