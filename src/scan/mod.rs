//! Scan Module
//!
//! Timer-driven simulated scan that hands off to the lab exactly once when
//! progress reaches 100%.

pub mod events;
pub mod scanner;
pub mod state;

pub use events::{ScanEvent, ScanEventBus};
pub use scanner::{ScanHandle, ScanOutcome, Scanner};
pub use state::{ScanState, SCAN_MESSAGES};
