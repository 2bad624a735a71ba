//! The EmotionAnalyzer ties normalization, scanning and decision together.
//!
//! ## Pipeline
//! 1. Normalize the text
//! 2. Keyword scan (per-emotion hit counts)
//! 3. Valence and polarity estimators
//! 4. Decision table picks the primary emotion
//! 5. Confidence from sentiment strength, subjectivity and keyword strength
//! 6. Up to two secondary emotions from the remaining keyword hits

use crate::decision_table::DecisionTable;
use crate::error::{AnalysisError, Result};
use crate::lexicon::Lexicon;
use crate::normalize::Normalizer;
use crate::sentiment::{PolarityEstimator, ValenceEstimator};
use crate::traits::Evidence;
use crate::types::{Emotion, EmotionResult, KeywordScores};
use tracing::{debug, error, instrument};

/// Lowest confidence the analyzer will report
pub const CONFIDENCE_FLOOR: f64 = 0.4;

/// Keyword factor used when no keyword matched
const NO_KEYWORD_FACTOR: f64 = 0.3;

/// Keyword count at which the keyword factor saturates
const KEYWORD_SATURATION: f64 = 5.0;

const MAX_SECONDARY: usize = 2;

/// Deterministic text-to-emotion analyzer.
///
/// Holds only immutable, pre-compiled state; analyzing the same text twice
/// always gives the same result.
pub struct EmotionAnalyzer {
    normalizer: Normalizer,
    lexicon: Lexicon,
    valence: ValenceEstimator,
    polarity: PolarityEstimator,
    decision_table: DecisionTable,
}

impl EmotionAnalyzer {
    /// Build an analyzer with the standard decision table
    pub fn new() -> Result<Self> {
        Self::with_decision_table(DecisionTable::standard())
    }

    /// Build an analyzer with a custom decision table
    pub fn with_decision_table(decision_table: DecisionTable) -> Result<Self> {
        Ok(Self {
            normalizer: Normalizer::new()?,
            lexicon: Lexicon::new()?,
            valence: ValenceEstimator::new(),
            polarity: PolarityEstimator::new(),
            decision_table,
        })
    }

    /// Analyze text, returning `None` for blank input or internal failure.
    ///
    /// Failures are logged; no partial result is ever returned.
    pub fn analyze(&self, text: &str) -> Option<EmotionResult> {
        match self.try_analyze(text) {
            Ok(result) => Some(result),
            Err(AnalysisError::EmptyInput) => {
                debug!("Skipping analysis of empty input");
                None
            }
            Err(e) => {
                error!("Error in emotion analysis: {}", e);
                None
            }
        }
    }

    /// Analyze text, reporting why no result could be produced
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub fn try_analyze(&self, text: &str) -> Result<EmotionResult> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let clean = self.normalizer.normalize(text);

        let keywords = self.lexicon.scan(&clean);
        let sentiment = self.valence.score(&clean);
        let polarity = self.polarity.score(&clean);

        ensure_finite("compound", sentiment.compound)?;
        ensure_finite("polarity", polarity.polarity)?;
        ensure_finite("subjectivity", polarity.subjectivity)?;

        let evidence = Evidence {
            keywords: &keywords,
            sentiment: &sentiment,
            polarity: polarity.polarity,
            subjectivity: polarity.subjectivity,
        };
        let decision = self.decision_table.decide(&evidence);
        let confidence = confidence(sentiment.compound, polarity.subjectivity, &keywords);
        let secondary_emotions = secondary_emotions(&keywords, decision.emotion);

        debug!(
            "Analyzed text: primary={} via {} (confidence {:.2}, compound {:.3}, keywords {})",
            decision.emotion,
            decision.rule,
            confidence,
            sentiment.compound,
            keywords.len()
        );

        Ok(EmotionResult {
            primary_emotion: decision.emotion,
            confidence,
            secondary_emotions,
            sentiment_scores: sentiment,
            polarity: polarity.polarity,
            subjectivity: polarity.subjectivity,
            keyword_scores: keywords,
            decided_by: decision.rule,
        })
    }

    /// Normalized form of the text, as seen by every scan
    pub fn normalize(&self, text: &str) -> String {
        self.normalizer.normalize(text)
    }
}

fn ensure_finite(signal: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AnalysisError::NonFiniteScore { signal })
    }
}

/// Mean of three clamped factors, floored at [`CONFIDENCE_FLOOR`]
pub(crate) fn confidence(compound: f64, subjectivity: f64, keywords: &KeywordScores) -> f64 {
    let sentiment_strength = (compound.abs() * 2.0).min(1.0);
    let keyword_strength = match keywords.max_count() {
        Some(max) => (max as f64 / KEYWORD_SATURATION).min(1.0),
        None => NO_KEYWORD_FACTOR,
    };

    let factors = [sentiment_strength, subjectivity, keyword_strength];
    let mean = factors.iter().map(|f| f.clamp(0.0, 1.0)).sum::<f64>() / factors.len() as f64;

    mean.clamp(CONFIDENCE_FLOOR, 1.0)
}

/// Keyword emotions other than the primary, strongest first, at most two
pub(crate) fn secondary_emotions(keywords: &KeywordScores, primary: Emotion) -> Vec<Emotion> {
    keywords
        .ranked()
        .into_iter()
        .map(|(emotion, _)| emotion)
        .filter(|emotion| *emotion != primary)
        .take(MAX_SECONDARY)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_confidence_is_floored() {
        let keywords = KeywordScores::new();
        // (0 + 0 + 0.3) / 3 = 0.1 -> floor
        assert!(approx(confidence(0.0, 0.0, &keywords), CONFIDENCE_FLOOR));
    }

    #[test]
    fn test_confidence_averages_factors() {
        let keywords: KeywordScores = [(Emotion::Joy, 2)].into_iter().collect();
        // (min(0.8, 1) + 0.7 + 2/5) / 3
        assert!(approx(confidence(0.4, 0.7, &keywords), (0.8 + 0.7 + 0.4) / 3.0));
    }

    #[test]
    fn test_confidence_saturates() {
        let keywords: KeywordScores = [(Emotion::Anger, 9)].into_iter().collect();
        assert!(approx(confidence(-0.95, 1.0, &keywords), 1.0));
    }

    #[test]
    fn test_secondary_excludes_primary_and_truncates() {
        let keywords: KeywordScores = [
            (Emotion::Joy, 3),
            (Emotion::Love, 1),
            (Emotion::Calm, 2),
            (Emotion::Fear, 1),
        ]
        .into_iter()
        .collect();

        let secondary = secondary_emotions(&keywords, Emotion::Joy);
        assert_eq!(secondary, vec![Emotion::Calm, Emotion::Fear]);
    }

    #[test]
    fn test_secondary_when_primary_not_in_keywords() {
        let keywords: KeywordScores = [(Emotion::Stress, 1)].into_iter().collect();
        assert_eq!(secondary_emotions(&keywords, Emotion::Joy), vec![Emotion::Stress]);
    }

    #[test]
    fn test_blank_input_is_empty() {
        let analyzer = EmotionAnalyzer::new().unwrap();
        assert!(matches!(analyzer.try_analyze("   \n\t"), Err(AnalysisError::EmptyInput)));
        assert!(analyzer.analyze("").is_none());
    }

    #[test]
    fn test_symbols_only_input_still_commits() {
        let analyzer = EmotionAnalyzer::new().unwrap();
        let result = analyzer.try_analyze("@#$%^&*()").unwrap();

        assert_eq!(result.primary_emotion, Emotion::Calm);
        assert!(approx(result.confidence, CONFIDENCE_FLOOR));
    }
}
