//! Scan State
//!
//! The simulated scan as an explicit state record. Progress is a pure
//! function of elapsed time, so the ticking task only has to feed it clocks.

use std::time::Duration;

/// Status lines shown while a scan runs, in order
pub const SCAN_MESSAGES: [&str; 10] = [
    "Initializing biometric trust engine…",
    "Synchronizing emotional signals…",
    "Measuring heart-rate resonance…",
    "Analyzing neural compatibility patterns…",
    "Processing trust algorithms…",
    "Evaluating emotional intelligence metrics…",
    "Calibrating compatibility matrix…",
    "Computing relationship longevity…",
    "Finalizing compatibility analysis…",
    "Generating comprehensive results…",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanState {
    Idle,
    Scanning { progress: f64 },
    /// Progress reached 100%; the result is being generated and saved
    Finishing,
    Cancelled,
    Complete,
}

impl ScanState {
    pub fn is_scanning(&self) -> bool {
        matches!(self, ScanState::Scanning { .. })
    }

    /// A scan owns the lab until its result is saved.
    pub fn is_busy(&self) -> bool {
        matches!(self, ScanState::Scanning { .. } | ScanState::Finishing)
    }

    /// Progress in percent; zero outside an active or finished scan.
    pub fn progress(&self) -> f64 {
        match self {
            ScanState::Scanning { progress } => *progress,
            ScanState::Finishing | ScanState::Complete => 100.0,
            ScanState::Idle | ScanState::Cancelled => 0.0,
        }
    }
}

/// `min(elapsed / duration * 100, 100)`
pub fn progress_for(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 100.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64() * 100.0).min(100.0)
}

/// Index into [`SCAN_MESSAGES`] for a progress value.
pub fn message_index(progress: f64) -> usize {
    let last = SCAN_MESSAGES.len() - 1;
    let index = (progress.clamp(0.0, 100.0) / 100.0 * last as f64).floor() as usize;
    index.min(last)
}
