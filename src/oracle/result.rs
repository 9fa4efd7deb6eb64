//! Result Types
//!
//! Name pairs, the persisted snapshot and the full compatibility result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::blood::BloodType;
use super::hash::seeded_metric;

/// Trim and lower-case a name for key derivation.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// An ordered pair of subjects. Order matters: swapping the names yields a
/// different key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePair {
    pub subject_a: String,
    pub subject_b: String,
}

impl NamePair {
    pub fn new(subject_a: impl Into<String>, subject_b: impl Into<String>) -> Self {
        Self {
            subject_a: subject_a.into().trim().to_string(),
            subject_b: subject_b.into().trim().to_string(),
        }
    }

    /// Cache/history key: `normA|normB`
    pub fn key(&self) -> String {
        format!("{}|{}", normalize_name(&self.subject_a), normalize_name(&self.subject_b))
    }
}

/// Metric tags fed into the seeded derivation
pub mod tags {
    pub const OVERALL: &str = "overall";
    pub const AFFINITY: &str = "affinity";
    pub const TRUST: &str = "trust";
    pub const EMOTIONAL_SYNC: &str = "emotional_sync";
    pub const LONG_TERM: &str = "long_term";
    pub const PASSION: &str = "passion";
}

/// Numeric and blood-type portion of a result, as stored in the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSnapshot {
    pub blood_type_a: BloodType,
    pub blood_type_b: BloodType,
    pub affinity: u8,
    pub trust: u8,
    pub emotional_sync: u8,
    pub long_term_potential: u8,
    pub passion_index: u8,
    pub overall_score: u8,
}

impl ResultSnapshot {
    /// Derive every stable field for a pair. The overall score is seeded on
    /// its own tag, never averaged from the component metrics.
    pub fn derive(pair: &NamePair) -> Self {
        let key = pair.key();
        Self {
            blood_type_a: BloodType::for_name(&pair.subject_a),
            blood_type_b: BloodType::for_name(&pair.subject_b),
            affinity: seeded_metric(&key, tags::AFFINITY),
            trust: seeded_metric(&key, tags::TRUST),
            emotional_sync: seeded_metric(&key, tags::EMOTIONAL_SYNC),
            long_term_potential: seeded_metric(&key, tags::LONG_TERM),
            passion_index: seeded_metric(&key, tags::PASSION),
            overall_score: seeded_metric(&key, tags::OVERALL),
        }
        .clamped()
    }

    /// Force every metric into `[0, 100]`; snapshots read back from storage
    /// go through this too.
    pub fn clamped(mut self) -> Self {
        for metric in [
            &mut self.affinity,
            &mut self.trust,
            &mut self.emotional_sync,
            &mut self.long_term_potential,
            &mut self.passion_index,
            &mut self.overall_score,
        ] {
            *metric = (*metric).min(100);
        }
        self
    }
}

/// A complete scan result ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityResult {
    pub subject_a: String,
    pub subject_b: String,
    pub blood_type_a: BloodType,
    pub blood_type_b: BloodType,
    pub affinity: u8,
    pub trust: u8,
    pub emotional_sync: u8,
    pub long_term_potential: u8,
    pub passion_index: u8,
    pub overall_score: u8,
    pub generated_at: DateTime<Utc>,
    pub insights: Vec<String>,
}

impl CompatibilityResult {
    pub fn from_snapshot(
        pair: &NamePair,
        snapshot: ResultSnapshot,
        insights: Vec<String>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            subject_a: pair.subject_a.clone(),
            subject_b: pair.subject_b.clone(),
            blood_type_a: snapshot.blood_type_a,
            blood_type_b: snapshot.blood_type_b,
            affinity: snapshot.affinity,
            trust: snapshot.trust,
            emotional_sync: snapshot.emotional_sync,
            long_term_potential: snapshot.long_term_potential,
            passion_index: snapshot.passion_index,
            overall_score: snapshot.overall_score,
            generated_at,
            insights,
        }
    }

    pub fn pair(&self) -> NamePair {
        NamePair::new(self.subject_a.as_str(), self.subject_b.as_str())
    }

    pub fn snapshot(&self) -> ResultSnapshot {
        ResultSnapshot {
            blood_type_a: self.blood_type_a,
            blood_type_b: self.blood_type_b,
            affinity: self.affinity,
            trust: self.trust,
            emotional_sync: self.emotional_sync,
            long_term_potential: self.long_term_potential,
            passion_index: self.passion_index,
            overall_score: self.overall_score,
        }
    }

    /// Labelled component metrics in display order.
    pub fn metrics(&self) -> [(&'static str, u8); 5] {
        [
            ("Affinity", self.affinity),
            ("Trust Level", self.trust),
            ("Emotional Sync", self.emotional_sync),
            ("Long-Term Potential", self.long_term_potential),
            ("Passion Index", self.passion_index),
        ]
    }

    pub fn formatted_date(&self) -> String {
        self.generated_at.format("%A, %B %-d, %Y %H:%M UTC").to_string()
    }

    /// Plain-text block for copying to the clipboard.
    pub fn summary_text(&self) -> String {
        format!(
            "LABX Compatibility Results\n{} & {}\nOverall Match: {}%\nDate: {}",
            self.subject_a,
            self.subject_b,
            self.overall_score,
            self.formatted_date()
        )
    }

    /// One-line message for sharing.
    pub fn share_text(&self) -> String {
        format!(
            "Check out our LABX compatibility results: {} & {} are a {}% match!",
            self.subject_a, self.subject_b, self.overall_score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pair_key_is_normalized_and_ordered() {
        let pair = NamePair::new("  Ann ", "BEN");
        assert_eq!(pair.subject_a, "Ann");
        assert_eq!(pair.key(), "ann|ben");
        assert_eq!(NamePair::new("Ben", "Ann").key(), "ben|ann");
    }

    #[test]
    fn test_snapshot_derivation_is_pure() {
        let pair = NamePair::new("Ann", "Ben");
        assert_eq!(ResultSnapshot::derive(&pair), ResultSnapshot::derive(&pair));
        assert_eq!(
            ResultSnapshot::derive(&pair),
            ResultSnapshot::derive(&NamePair::new("ANN", " ben "))
        );
    }

    #[test]
    fn test_clamped_caps_corrupt_values() {
        let snapshot = ResultSnapshot {
            blood_type_a: BloodType::OPositive,
            blood_type_b: BloodType::ONegative,
            affinity: 250,
            trust: 100,
            emotional_sync: 0,
            long_term_potential: 101,
            passion_index: 42,
            overall_score: 255,
        }
        .clamped();
        assert_eq!(snapshot.affinity, 100);
        assert_eq!(snapshot.long_term_potential, 100);
        assert_eq!(snapshot.overall_score, 100);
        assert_eq!(snapshot.passion_index, 42);
    }

    #[test]
    fn test_share_and_summary_text() {
        let pair = NamePair::new("Ann", "Ben");
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 14, 5, 0).unwrap();
        let result = CompatibilityResult::from_snapshot(
            &pair,
            ResultSnapshot::derive(&pair),
            vec![String::new(); 3],
            at,
        );
        let score = result.overall_score;

        assert_eq!(
            result.share_text(),
            format!("Check out our LABX compatibility results: Ann & Ben are a {score}% match!")
        );
        assert_eq!(
            result.summary_text(),
            format!(
                "LABX Compatibility Results\nAnn & Ben\nOverall Match: {score}%\nDate: Monday, October 19, 2026 14:05 UTC"
            )
        );
    }
}
