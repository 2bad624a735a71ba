//! Neither strongly positive nor strongly negative.

use crate::traits::{Evidence, Rule};
use crate::types::Emotion;

/// Top keyword emotion if any, otherwise `default` (calm).
///
/// Always commits, so it belongs at the end of the table.
pub struct NeutralBandRule {
    default: Emotion,
}

impl NeutralBandRule {
    pub fn new(default: Emotion) -> Self {
        Self { default }
    }
}

impl Default for NeutralBandRule {
    fn default() -> Self {
        Self::new(Emotion::Calm)
    }
}

impl Rule for NeutralBandRule {
    fn name(&self) -> &str {
        "neutral-band"
    }

    fn decide(&self, evidence: &Evidence<'_>) -> Option<Emotion> {
        Some(
            evidence
                .keywords
                .top()
                .map(|(emotion, _)| emotion)
                .unwrap_or(self.default),
        )
    }
}
