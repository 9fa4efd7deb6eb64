//! Compatibility Oracle
//!
//! Deterministic derivation of compatibility results from a pair of names:
//! - 32-bit rolling hash and sine-seeded metrics
//! - per-name blood types
//! - bucketed narrative insights
//! - the cache-first generator

pub mod blood;
pub mod generator;
pub mod hash;
pub mod insights;
pub mod result;

pub use blood::BloodType;
pub use generator::ResultGenerator;
pub use hash::{name_hash, seeded_metric};
pub use insights::{MessagePicker, RandomPicker};
pub use result::{normalize_name, CompatibilityResult, NamePair, ResultSnapshot};
