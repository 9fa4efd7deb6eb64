//! Insight Text Selection
//!
//! Two bucket tables turn an overall score into narrative text:
//!
//! | Table | Buckets | Output |
//! |-------|---------|--------|
//! | Category | ≤20, ≤40, ≤60, ≤75, ≤85, top | label, fixed description, 3-message pool |
//! | Descriptive | ≥90 … ≥20, bottom | one fixed line |
//!
//! Only the pool pick is random, and it goes through [`MessagePicker`] so
//! numeric fields can never depend on it.

use rand::Rng;

/// One band of the six-way category table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub label: &'static str,
    pub description: &'static str,
    pub messages: [&'static str; 3],
}

static CATEGORIES: [(u8, Category); 6] = [
    (
        20,
        Category {
            label: "Cosmic Strangers",
            description: "The scan registers only faint overlap between these two biometric signatures.",
            messages: [
                "Opposites rarely attract this far apart, but friendships have started from less.",
                "Your signals pass each other like ships in the night.",
                "Common ground is scarce, so any shared interest is worth holding on to.",
            ],
        },
    ),
    (
        40,
        Category {
            label: "Curious Acquaintances",
            description: "There is a measurable spark, though it sits well below the resonance threshold.",
            messages: [
                "A slow start can still build into something steady with patience.",
                "Your rhythms differ, which leaves plenty to learn from each other.",
                "Conversation will carry this connection further than chemistry.",
            ],
        },
    ),
    (
        60,
        Category {
            label: "Promising Spark",
            description: "The scanner detects balanced signals with clear room for the bond to grow.",
            messages: [
                "Shared values show up in several dimensions of the scan.",
                "Emotional sync is uneven but trending in the right direction.",
                "With attention to communication, this pairing could surprise you both.",
            ],
        },
    ),
    (
        75,
        Category {
            label: "Strong Resonance",
            description: "Heart-rate resonance and trust markers line up well across most of the scan.",
            messages: [
                "You tend to finish each other's sentences, or will soon.",
                "Trust indicators point to a dependable foundation.",
                "Your neural patterns show a natural ease around each other.",
            ],
        },
    ),
    (
        85,
        Category {
            label: "Deep Harmony",
            description: "The scan shows exceptional alignment in emotional and long-term indicators.",
            messages: [
                "Passion and stability rarely measure this close together.",
                "Your compatibility matrix reads like a well-tuned duet.",
                "Long-term potential is among the strongest the lab records.",
            ],
        },
    ),
    (
        100,
        Category {
            label: "Soulmate Signal",
            description: "Biometric signatures converge almost completely. The lab rarely sees readings like this.",
            messages: [
                "The scanner had to double-check its calibration on this one.",
                "Every metric leans the same way, and it leans high.",
                "This is the kind of reading the lab keeps on the wall.",
            ],
        },
    ),
];

static DESCRIPTIONS: [(u8, &str); 8] = [
    (90, "Extraordinary compatibility with near-perfect alignment across every relationship dimension."),
    (80, "An exceptionally strong connection with excellent emotional intelligence and communication."),
    (70, "A solid foundation for a meaningful connection with good compatibility in most areas."),
    (60, "Several areas of notable compatibility that could anchor a meaningful connection."),
    (50, "A balanced match where mutual effort will decide how far the bond can go."),
    (40, "Some compatibility areas worth exploring with mindful attention to differences."),
    (30, "A connection that needs intentional communication to build lasting compatibility."),
    (20, "Limited overlap, though friendship foundations could still grow over time."),
];

const BOTTOM_DESCRIPTION: &str =
    "Minimal resonance detected. Shared activities may reveal connection points the scan cannot see.";

/// Six-way category for an overall score.
pub fn category_for(score: u8) -> &'static Category {
    CATEGORIES
        .iter()
        .find(|(ceiling, _)| score <= *ceiling)
        .map(|(_, category)| category)
        .unwrap_or(&CATEGORIES[CATEGORIES.len() - 1].1)
}

/// Ten-way descriptive line for an overall score.
pub fn description_for(score: u8) -> &'static str {
    DESCRIPTIONS
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map(|(_, text)| *text)
        .unwrap_or(BOTTOM_DESCRIPTION)
}

/// Source of the non-deterministic flavor pick
pub trait MessagePicker: Send + Sync {
    /// Return an index in `0..len`.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform pick from the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl MessagePicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Build the three insight lines for an overall score.
pub fn build_insights(overall_score: u8, picker: &dyn MessagePicker) -> Vec<String> {
    let category = category_for(overall_score);
    let index = picker.pick(category.messages.len()).min(category.messages.len() - 1);

    vec![
        category.description.to_string(),
        category.messages[index].to_string(),
        description_for(overall_score).to_string(),
    ]
}
