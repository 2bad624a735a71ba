//! Core domain types for emotion analysis.
//!
//! - [`Emotion`]: the closed set of ten labels
//! - [`KeywordScores`]: sparse per-emotion keyword counts
//! - [`SentimentScores`]: compound score plus pos/neg/neu proportions
//! - [`EmotionResult`]: the immutable output of one analysis

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Emotion
// =============================================================================

/// One of the ten emotions the analyzer can commit to.
///
/// Variant order is the canonical order: it drives iteration over the
/// lexicon and breaks ties between equally-scored emotions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Disgust,
    Love,
    Anticipation,
    Calm,
    Stress,
}

impl Emotion {
    /// Every emotion, in canonical order
    pub const ALL: [Emotion; 10] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Disgust,
        Emotion::Love,
        Emotion::Anticipation,
        Emotion::Calm,
        Emotion::Stress,
    ];

    /// Lower-case label, e.g. `"joy"`
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Disgust => "disgust",
            Emotion::Love => "love",
            Emotion::Anticipation => "anticipation",
            Emotion::Calm => "calm",
            Emotion::Stress => "stress",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        Emotion::ALL
            .into_iter()
            .find(|emotion| emotion.as_str() == label)
            .ok_or_else(|| AnalysisError::UnknownEmotion(s.to_string()))
    }
}

// =============================================================================
// Keyword scores
// =============================================================================

/// Sparse mapping `emotion -> keyword hits`.
///
/// Only emotions with at least one hit are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordScores(BTreeMap<Emotion, u32>);

impl KeywordScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a count for an emotion. Zero counts are dropped.
    pub fn insert(&mut self, emotion: Emotion, count: u32) {
        if count > 0 {
            self.0.insert(emotion, count);
        } else {
            self.0.remove(&emotion);
        }
    }

    pub fn get(&self, emotion: Emotion) -> u32 {
        self.0.get(&emotion).copied().unwrap_or(0)
    }

    pub fn contains(&self, emotion: Emotion) -> bool {
        self.0.contains_key(&emotion)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, u32)> + '_ {
        self.0.iter().map(|(emotion, count)| (*emotion, *count))
    }

    /// Highest-scoring emotion; ties go to the earlier emotion in canonical order.
    pub fn top(&self) -> Option<(Emotion, u32)> {
        self.iter().fold(None, |best, (emotion, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((emotion, count)),
        })
    }

    /// Highest count, if any emotion was hit
    pub fn max_count(&self) -> Option<u32> {
        self.0.values().copied().max()
    }

    /// All hits sorted by descending count, canonical order within ties
    pub fn ranked(&self) -> Vec<(Emotion, u32)> {
        let mut ranked: Vec<(Emotion, u32)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl FromIterator<(Emotion, u32)> for KeywordScores {
    fn from_iter<I: IntoIterator<Item = (Emotion, u32)>>(iter: I) -> Self {
        let mut scores = KeywordScores::new();
        for (emotion, count) in iter {
            let total = scores.get(emotion) + count;
            scores.insert(emotion, total);
        }
        scores
    }
}

// =============================================================================
// Sentiment and result
// =============================================================================

/// Output of the rule-based valence estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    /// Overall valence in [-1, 1]
    pub compound: f64,
    /// Proportion of positive signal in [0, 1]
    pub positive: f64,
    /// Proportion of negative signal in [0, 1]
    pub negative: f64,
    /// Proportion of neutral tokens in [0, 1]
    pub neutral: f64,
}

impl SentimentScores {
    /// Scores for text with no sentiment-bearing tokens
    pub fn neutral() -> Self {
        Self {
            compound: 0.0,
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
        }
    }
}

/// Result of analyzing one piece of text.
///
/// Constructed once by the analyzer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionResult {
    pub primary_emotion: Emotion,
    /// Always within [0.4, 1.0]
    pub confidence: f64,
    /// Up to two runner-up emotions, most salient first, never the primary
    pub secondary_emotions: Vec<Emotion>,
    pub sentiment_scores: SentimentScores,
    /// Valence in [-1, 1] from the polarity estimator
    pub polarity: f64,
    /// Opinion strength in [0, 1] from the polarity estimator
    pub subjectivity: f64,
    /// Keyword hits that fed the decision
    pub keyword_scores: KeywordScores,
    /// Name of the decision rule that picked `primary_emotion`
    pub decided_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emotion_round_trips_through_str() {
        for emotion in Emotion::ALL {
            let parsed: Emotion = emotion.as_str().parse().unwrap();
            assert_eq!(parsed, emotion);
        }
        assert_eq!(" JOY ".parse::<Emotion>().unwrap(), Emotion::Joy);
        assert!("boredom".parse::<Emotion>().is_err());
    }

    #[test]
    fn test_keyword_scores_drop_zero_counts() {
        let mut scores = KeywordScores::new();
        scores.insert(Emotion::Joy, 0);
        assert!(scores.is_empty());

        scores.insert(Emotion::Fear, 2);
        scores.insert(Emotion::Fear, 0);
        assert!(!scores.contains(Emotion::Fear));
    }

    #[test]
    fn test_top_breaks_ties_by_canonical_order() {
        let scores: KeywordScores = [(Emotion::Stress, 2), (Emotion::Sadness, 2), (Emotion::Love, 1)]
            .into_iter()
            .collect();

        assert_eq!(scores.top(), Some((Emotion::Sadness, 2)));
        assert_eq!(scores.max_count(), Some(2));
    }

    #[test]
    fn test_ranked_sorts_by_count_then_canonical_order() {
        let scores: KeywordScores = [
            (Emotion::Calm, 1),
            (Emotion::Anger, 3),
            (Emotion::Joy, 1),
        ]
        .into_iter()
        .collect();

        let ranked = scores.ranked();
        assert_eq!(
            ranked,
            vec![(Emotion::Anger, 3), (Emotion::Joy, 1), (Emotion::Calm, 1)]
        );
    }

    #[test]
    fn test_emotion_serializes_lowercase() {
        let json = serde_json::to_string(&Emotion::Anticipation).unwrap();
        assert_eq!(json, "\"anticipation\"");

        let scores: KeywordScores = [(Emotion::Joy, 2)].into_iter().collect();
        let json = serde_json::to_string(&scores).unwrap();
        assert_eq!(json, "{\"joy\":2}");
    }
}
