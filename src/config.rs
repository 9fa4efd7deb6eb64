//! Lab Configuration
//!
//! Defaults mirror the web scanner: a 10 second scan ticking every 100ms and
//! a 15-entry history. Each value can be overridden from the environment.

use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::storage::JsonFileStore;
use crate::storage::history::DEFAULT_HISTORY_LIMIT;

pub const ENV_STORAGE_PATH: &str = "LABX_STORAGE_PATH";
pub const ENV_SCAN_DURATION_MS: &str = "LABX_SCAN_DURATION_MS";
pub const ENV_TICK_MS: &str = "LABX_TICK_MS";
pub const ENV_HISTORY_LIMIT: &str = "LABX_HISTORY_LIMIT";

/// Configuration for the lab
#[derive(Debug, Clone, PartialEq)]
pub struct LabConfig {
    /// Path to the storage file
    pub storage_path: PathBuf,
    /// Wall-clock length of a simulated scan
    pub scan_duration: Duration,
    /// Progress polling interval
    pub tick: Duration,
    /// Maximum number of history entries kept
    pub history_limit: usize,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            storage_path: JsonFileStore::default_path(),
            scan_duration: Duration::from_millis(10_000),
            tick: Duration::from_millis(100),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl LabConfig {
    /// Defaults overridden by `LABX_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unparsable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_STORAGE_PATH).filter(|p| !p.trim().is_empty()) {
            config.storage_path = PathBuf::from(path);
        }
        if let Some(ms) = parse_positive(&lookup, ENV_SCAN_DURATION_MS) {
            config.scan_duration = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_positive(&lookup, ENV_TICK_MS) {
            config.tick = Duration::from_millis(ms);
        }
        if let Some(limit) = parse_positive(&lookup, ENV_HISTORY_LIMIT) {
            config.history_limit = limit as usize;
        }

        config
    }
}

fn parse_positive(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            warn!("Ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = LabConfig::default();
        assert_eq!(config.storage_path, PathBuf::from("labx_storage.json"));
        assert_eq!(config.scan_duration, Duration::from_secs(10));
        assert_eq!(config.tick, Duration::from_millis(100));
        assert_eq!(config.history_limit, 15);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_STORAGE_PATH, "/tmp/lab.json"),
            (ENV_SCAN_DURATION_MS, "2500"),
            (ENV_TICK_MS, "50"),
            (ENV_HISTORY_LIMIT, "5"),
        ]);
        let config = LabConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.storage_path, PathBuf::from("/tmp/lab.json"));
        assert_eq!(config.scan_duration, Duration::from_millis(2500));
        assert_eq!(config.tick, Duration::from_millis(50));
        assert_eq!(config.history_limit, 5);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(ENV_SCAN_DURATION_MS, "soon"), (ENV_TICK_MS, "0")]);
        let config = LabConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config, LabConfig::default());
    }
}
