//! LABX Compatibility Lab
//!
//! A novelty compatibility scanner with:
//! - Deterministic, hash-seeded compatibility metrics per name pair
//! - Persistent result cache and scan history
//! - Timer-driven simulated scan with cancellation
//! - Name validation for front-ends

pub mod config;
pub mod error;
pub mod lab;
pub mod oracle;
pub mod scan;
pub mod storage;
pub mod validation;

// Re-exports for convenience
pub use config::LabConfig;
pub use error::{LabError, LabResult};
pub use lab::CompatibilityLab;
pub use oracle::{BloodType, CompatibilityResult, NamePair};
pub use scan::{ScanEvent, ScanOutcome, ScanState, Scanner};
