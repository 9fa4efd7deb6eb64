//! Scan Lifecycle
//!
//! Drives the scanner against a file-backed lab the way the terminal
//! front-end does.

use std::sync::Arc;
use std::time::Duration;

use labx_scanner::scan::ScanEvent;
use labx_scanner::{CompatibilityLab, LabConfig, ScanOutcome, ScanState, Scanner};
use tempfile::tempdir;

fn config(dir: &std::path::Path, duration_ms: u64) -> LabConfig {
    LabConfig {
        storage_path: dir.join("labx_storage.json"),
        scan_duration: Duration::from_millis(duration_ms),
        tick: Duration::from_millis(10),
        ..LabConfig::default()
    }
}

#[tokio::test]
async fn test_completed_scan_is_persisted() {
    let temp_dir = tempdir().unwrap();
    let config = config(temp_dir.path(), 80);
    let lab = Arc::new(CompatibilityLab::from_config(&config));
    let scanner = Scanner::from_config(lab.clone(), &config);

    let outcome = scanner.start("Ann", "Ben").await.unwrap().wait().await;
    let ScanOutcome::Completed(result) = outcome else {
        panic!("scan should complete");
    };

    // A fresh lab over the same file sees both the history and the cache
    let reopened = CompatibilityLab::from_config(&config);
    let history = reopened.history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].result.snapshot(), result.snapshot());
    assert_eq!(reopened.cache().get("ann|ben").await, Some(result.snapshot()));
}

#[tokio::test]
async fn test_cancelled_scan_leaves_storage_untouched() {
    let temp_dir = tempdir().unwrap();
    let config = config(temp_dir.path(), 10_000);
    let lab = Arc::new(CompatibilityLab::from_config(&config));
    let scanner = Scanner::from_config(lab.clone(), &config);

    let mut events = scanner.subscribe();
    let handle = scanner.start("Ann", "Ben").await.unwrap();

    // Wait for at least one progress tick before cancelling
    loop {
        match events.recv().await.unwrap() {
            ScanEvent::Progress { .. } => break,
            _ => continue,
        }
    }

    assert!(scanner.cancel().await);
    assert_eq!(handle.wait().await, ScanOutcome::Cancelled);
    assert_eq!(scanner.state().await, ScanState::Cancelled);
    assert!(lab.history().await.is_empty());
    assert!(!config.storage_path.exists());
}
