//! Strong keyword evidence dominates sentiment.

use crate::traits::{Evidence, Rule};
use crate::types::Emotion;

/// Commits to the top keyword emotion when its count reaches `min_count`
pub struct StrongLexicalRule {
    min_count: u32,
}

impl StrongLexicalRule {
    pub fn new(min_count: u32) -> Self {
        Self { min_count }
    }
}

impl Default for StrongLexicalRule {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Rule for StrongLexicalRule {
    fn name(&self) -> &str {
        "strong-lexical"
    }

    fn decide(&self, evidence: &Evidence<'_>) -> Option<Emotion> {
        evidence
            .keywords
            .top()
            .filter(|(_, count)| *count >= self.min_count)
            .map(|(emotion, _)| emotion)
    }
}
