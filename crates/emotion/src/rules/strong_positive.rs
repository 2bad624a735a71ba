//! Strongly positive sentiment.

use crate::traits::{Evidence, Rule};
use crate::types::Emotion;

const PREFERRED: [Emotion; 4] = [
    Emotion::Joy,
    Emotion::Love,
    Emotion::Anticipation,
    Emotion::Surprise,
];

/// Commits when compound ≥ `threshold`.
///
/// Picks the first of joy, love, anticipation, surprise that has keyword
/// hits, else joy.
pub struct StrongPositiveRule {
    threshold: f64,
}

impl StrongPositiveRule {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for StrongPositiveRule {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl Rule for StrongPositiveRule {
    fn name(&self) -> &str {
        "strong-positive"
    }

    fn decide(&self, evidence: &Evidence<'_>) -> Option<Emotion> {
        if evidence.sentiment.compound < self.threshold {
            return None;
        }

        let emotion = PREFERRED
            .into_iter()
            .find(|emotion| evidence.keywords.contains(*emotion))
            .unwrap_or(Emotion::Joy);
        Some(emotion)
    }
}
