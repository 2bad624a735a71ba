//! Core traits for the primary-emotion decision table.
//!
//! Each decision rule looks at the same [`Evidence`] and either commits to an
//! emotion or passes. Rules are evaluated in priority order by
//! [`DecisionTable`](crate::DecisionTable); the first rule that commits wins.

use crate::types::{Emotion, KeywordScores, SentimentScores};

/// Signals gathered from one piece of text
#[derive(Debug, Clone, Copy)]
pub struct Evidence<'a> {
    pub keywords: &'a KeywordScores,
    pub sentiment: &'a SentimentScores,
    pub polarity: f64,
    pub subjectivity: f64,
}

/// A single row of the decision table.
///
/// `Send + Sync` so an analyzer can be shared across threads.
pub trait Rule: Send + Sync {
    /// Returns the name of this rule (for logging and `EmotionResult::decided_by`)
    fn name(&self) -> &str;

    /// Commit to an emotion, or `None` to let the next rule decide
    fn decide(&self, evidence: &Evidence<'_>) -> Option<Emotion>;
}
