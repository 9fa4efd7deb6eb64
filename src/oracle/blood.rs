//! Blood Type Derivation
//!
//! Each subject gets a blood type derived from their own name only, so the
//! same person keeps the same type across every pairing.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::hash::name_hash;
use super::result::normalize_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    /// Fixed lookup order; the hash indexes into this table.
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    /// Derive the blood type for one subject's name.
    pub fn for_name(name: &str) -> Self {
        let index = name_hash(&normalize_name(name)) % Self::ALL.len() as u32;
        Self::ALL[index as usize]
    }

    pub fn tag(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A−",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B−",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB−",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O−",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blood_type_is_stable_per_name() {
        // hash("ann") = 96737, 96737 % 8 = 1
        assert_eq!(BloodType::for_name("ann"), BloodType::ANegative);
        assert_eq!(BloodType::for_name("  ANN "), BloodType::ANegative);
        // hash("ben") = 97419, 97419 % 8 = 3
        assert_eq!(BloodType::for_name("Ben"), BloodType::BNegative);
    }

    #[test]
    fn test_blood_type_is_one_of_eight() {
        for name in ["ann", "ben", "zz", "mary-jane", "o'neil", "x"] {
            assert!(BloodType::ALL.contains(&BloodType::for_name(name)));
        }
    }

    #[test]
    fn test_serialized_tags() {
        let json = serde_json::to_string(&BloodType::AbNegative).unwrap();
        assert_eq!(json, "\"AB-\"");
        let back: BloodType = serde_json::from_str("\"O+\"").unwrap();
        assert_eq!(back, BloodType::OPositive);
        assert_eq!(BloodType::AbNegative.to_string(), "AB−");
    }
}
