//! Scan Session Driver
//!
//! Runs one simulated scan at a time on a tokio interval. Completion and
//! cancellation both go through the same state lock, so a cancelled scan can
//! never reach the generator. A scan keeps the slot busy until its result has
//! been saved to history.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::events::{ScanEvent, ScanEventBus};
use super::state::{message_index, progress_for, ScanState, SCAN_MESSAGES};
use crate::config::LabConfig;
use crate::lab::CompatibilityLab;
use crate::oracle::CompatibilityResult;

/// How a scan task ended
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Completed(Box<CompatibilityResult>),
    Cancelled,
}

struct ScanSlot {
    state: ScanState,
    scan_id: Option<Uuid>,
    cancel: Option<watch::Sender<bool>>,
}

/// Handle to a running scan task
pub struct ScanHandle {
    pub scan_id: Uuid,
    task: JoinHandle<ScanOutcome>,
}

impl ScanHandle {
    /// Wait for the scan to finish.
    pub async fn wait(self) -> ScanOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Scan task {} aborted: {}", self.scan_id, e);
                ScanOutcome::Cancelled
            }
        }
    }
}

pub struct Scanner {
    lab: Arc<CompatibilityLab>,
    duration: Duration,
    tick: Duration,
    slot: Arc<Mutex<ScanSlot>>,
    events: Arc<ScanEventBus>,
}

impl Scanner {
    pub fn new(lab: Arc<CompatibilityLab>, duration: Duration, tick: Duration) -> Self {
        Self {
            lab,
            duration,
            tick: tick.max(Duration::from_millis(1)),
            slot: Arc::new(Mutex::new(ScanSlot {
                state: ScanState::Idle,
                scan_id: None,
                cancel: None,
            })),
            events: Arc::new(ScanEventBus::new()),
        }
    }

    pub fn from_config(lab: Arc<CompatibilityLab>, config: &LabConfig) -> Self {
        Self::new(lab, config.scan_duration, config.tick)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ScanEvent> {
        self.events.subscribe()
    }

    pub async fn state(&self) -> ScanState {
        self.slot.lock().await.state
    }

    /// Begin a scan for the pair. Returns `None` without side effects while
    /// another scan is running or still saving its result.
    pub async fn start(&self, subject_a: &str, subject_b: &str) -> Option<ScanHandle> {
        let scan_id = Uuid::new_v4();
        let (cancel_tx, cancel_rx) = watch::channel(false);

        {
            let mut slot = self.slot.lock().await;
            if slot.state.is_busy() {
                debug!("Scan already in progress, ignoring start");
                return None;
            }
            slot.state = ScanState::Scanning { progress: 0.0 };
            slot.scan_id = Some(scan_id);
            slot.cancel = Some(cancel_tx);
        }

        info!("🔬 Starting scan {} for {} & {}", scan_id, subject_a.trim(), subject_b.trim());
        self.events.publish(ScanEvent::Started {
            scan_id,
            subject_a: subject_a.trim().to_string(),
            subject_b: subject_b.trim().to_string(),
        });
        self.events.publish(ScanEvent::Status {
            scan_id,
            message: SCAN_MESSAGES[0].to_string(),
        });

        let run = ScanRun {
            scan_id,
            subject_a: subject_a.to_string(),
            subject_b: subject_b.to_string(),
            lab: self.lab.clone(),
            duration: self.duration,
            tick: self.tick,
            slot: self.slot.clone(),
            events: self.events.clone(),
        };
        let task = tokio::spawn(run.execute(cancel_rx));

        Some(ScanHandle { scan_id, task })
    }

    /// Cancel the running scan. Returns `false` if nothing was scanning.
    pub async fn cancel(&self) -> bool {
        let mut slot = self.slot.lock().await;
        if !slot.state.is_scanning() {
            return false;
        }

        slot.state = ScanState::Cancelled;
        if let Some(cancel) = slot.cancel.take() {
            let _ = cancel.send(true);
        }
        if let Some(scan_id) = slot.scan_id {
            info!("🛑 Scan {} cancelled", scan_id);
            self.events.publish(ScanEvent::Cancelled { scan_id });
        }
        true
    }
}

struct ScanRun {
    scan_id: Uuid,
    subject_a: String,
    subject_b: String,
    lab: Arc<CompatibilityLab>,
    duration: Duration,
    tick: Duration,
    slot: Arc<Mutex<ScanSlot>>,
    events: Arc<ScanEventBus>,
}

impl ScanRun {
    async fn execute(self, mut cancel_rx: watch::Receiver<bool>) -> ScanOutcome {
        let started = Instant::now();
        let mut ticker = tokio::time::interval(self.tick);
        let mut current_message = 0;

        loop {
            tokio::select! {
                changed = cancel_rx.changed() => {
                    if changed.is_err() || *cancel_rx.borrow() {
                        return ScanOutcome::Cancelled;
                    }
                    continue;
                }
                _ = ticker.tick() => {}
            }

            let progress = progress_for(started.elapsed(), self.duration);
            let complete = progress >= 100.0;

            {
                let mut slot = self.slot.lock().await;
                if slot.scan_id != Some(self.scan_id) || !slot.state.is_scanning() {
                    return ScanOutcome::Cancelled;
                }
                if complete {
                    slot.state = ScanState::Finishing;
                    slot.cancel = None;
                } else {
                    slot.state = ScanState::Scanning { progress };
                }
            }

            self.events.publish(ScanEvent::Progress { scan_id: self.scan_id, progress });

            let index = message_index(progress);
            if index != current_message {
                current_message = index;
                self.events.publish(ScanEvent::Status {
                    scan_id: self.scan_id,
                    message: SCAN_MESSAGES[index].to_string(),
                });
            }

            if complete {
                break;
            }
        }

        info!("✅ Scan {} complete, generating results", self.scan_id);
        let result = self.lab.generate(&self.subject_a, &self.subject_b).await;
        if let Err(e) = self.lab.record_history(&result).await {
            warn!("Failed to save scan {} to history: {}", self.scan_id, e);
        }

        {
            let mut slot = self.slot.lock().await;
            if slot.scan_id == Some(self.scan_id) {
                slot.state = ScanState::Complete;
            }
        }

        self.events.publish(ScanEvent::Completed {
            scan_id: self.scan_id,
            result: Box::new(result.clone()),
        });
        ScanOutcome::Completed(Box::new(result))
    }
}
