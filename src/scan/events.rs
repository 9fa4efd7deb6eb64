//! Scan Events
//!
//! Broadcast notifications a front-end can render while a scan runs.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::oracle::CompatibilityResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ScanEvent {
    /// A scan began for the given pair
    Started { scan_id: Uuid, subject_a: String, subject_b: String },
    /// Progress advanced (percent, 0-100)
    Progress { scan_id: Uuid, progress: f64 },
    /// The status line changed
    Status { scan_id: Uuid, message: String },
    /// The scan finished and produced a result
    Completed { scan_id: Uuid, result: Box<CompatibilityResult> },
    /// The scan was cancelled before completion
    Cancelled { scan_id: Uuid },
}

impl ScanEvent {
    pub fn scan_id(&self) -> Uuid {
        match self {
            ScanEvent::Started { scan_id, .. }
            | ScanEvent::Progress { scan_id, .. }
            | ScanEvent::Status { scan_id, .. }
            | ScanEvent::Completed { scan_id, .. }
            | ScanEvent::Cancelled { scan_id } => *scan_id,
        }
    }
}

pub struct ScanEventBus {
    tx: broadcast::Sender<ScanEvent>,
}

impl ScanEventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        Self { tx }
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: ScanEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ScanEvent> {
        self.tx.subscribe()
    }
}

impl Default for ScanEventBus {
    fn default() -> Self {
        Self::new()
    }
}
