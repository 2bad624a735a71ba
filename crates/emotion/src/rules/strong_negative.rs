//! Strongly negative sentiment.

use crate::traits::{Evidence, Rule};
use crate::types::Emotion;

const PREFERRED: [Emotion; 4] = [
    Emotion::Sadness,
    Emotion::Anger,
    Emotion::Fear,
    Emotion::Disgust,
];

/// Commits when compound ≤ `threshold`.
///
/// ## Algorithm
/// 1. First of sadness, anger, fear, disgust with keyword hits
/// 2. Else, if the negative proportion exceeds `negative_ratio`:
///    sadness when polarity < `polarity_cutoff`, otherwise anger
/// 3. Else sadness
pub struct StrongNegativeRule {
    threshold: f64,
    negative_ratio: f64,
    polarity_cutoff: f64,
}

impl StrongNegativeRule {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            negative_ratio: 0.3,
            polarity_cutoff: -0.3,
        }
    }

    /// Negative proportion above which polarity splits sadness from anger (default: 0.3)
    pub fn with_negative_ratio(mut self, ratio: f64) -> Self {
        self.negative_ratio = ratio;
        self
    }

    /// Polarity below which the split picks sadness (default: -0.3)
    pub fn with_polarity_cutoff(mut self, cutoff: f64) -> Self {
        self.polarity_cutoff = cutoff;
        self
    }
}

impl Default for StrongNegativeRule {
    fn default() -> Self {
        Self::new(-0.5)
    }
}

impl Rule for StrongNegativeRule {
    fn name(&self) -> &str {
        "strong-negative"
    }

    fn decide(&self, evidence: &Evidence<'_>) -> Option<Emotion> {
        if evidence.sentiment.compound > self.threshold {
            return None;
        }

        if let Some(emotion) = PREFERRED
            .into_iter()
            .find(|emotion| evidence.keywords.contains(*emotion))
        {
            return Some(emotion);
        }

        if evidence.sentiment.negative > self.negative_ratio {
            if evidence.polarity < self.polarity_cutoff {
                return Some(Emotion::Sadness);
            }
            return Some(Emotion::Anger);
        }

        Some(Emotion::Sadness)
    }
}
