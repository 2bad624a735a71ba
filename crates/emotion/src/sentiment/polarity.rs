//! Polarity/subjectivity estimator.
//!
//! Every lexicon hit is an assessment `(polarity, subjectivity)`. An
//! intensifier right before a hit multiplies both values; a negation anywhere
//! since the previous hit multiplies polarity by -0.5. The result is the mean
//! over all assessments, or `(0, 0)` when nothing matched.

use super::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

const NEGATION_FACTOR: f64 = -0.5;

const POLARITY_LEXICON: &[(&str, f64, f64)] = &[
    // positive
    ("happy", 0.8, 1.0), ("excited", 0.375, 0.75), ("thrilled", 0.5, 0.7),
    ("joyful", 0.8, 0.9), ("cheerful", 0.8, 0.8), ("delighted", 0.7, 0.8),
    ("glad", 0.5, 1.0), ("great", 0.8, 0.75), ("good", 0.7, 0.6),
    ("best", 1.0, 0.3), ("wonderful", 1.0, 1.0), ("beautiful", 0.85, 1.0),
    ("amazing", 0.6, 0.9), ("awesome", 1.0, 1.0), ("excellent", 1.0, 1.0),
    ("fantastic", 0.4, 0.9), ("nice", 0.6, 1.0), ("perfect", 1.0, 1.0),
    ("lovely", 0.5, 0.75), ("fun", 0.3, 0.2), ("calm", 0.3, 0.75),
    ("peaceful", 0.25, 0.5), ("relaxed", 0.2, 0.5), ("hopeful", 0.5, 0.6),
    ("romantic", 0.3, 0.5), ("brilliant", 0.9, 1.0), ("proud", 0.8, 1.0),
    ("grateful", 0.6, 0.8), ("optimistic", 0.4, 0.6), ("eager", 0.25, 0.5),
    // negative
    ("sad", -0.5, 1.0), ("depressed", -0.6, 0.7), ("gloomy", -0.6, 0.8),
    ("angry", -0.5, 1.0), ("furious", -0.8, 1.0), ("mad", -0.625, 1.0),
    ("frustrated", -0.7, 0.4), ("annoyed", -0.4, 0.6), ("scared", -0.5, 0.8),
    ("afraid", -0.6, 0.9), ("terrified", -1.0, 1.0), ("anxious", -0.25, 0.7),
    ("worried", -0.3, 0.6), ("nervous", -0.2, 0.5), ("bad", -0.7, 0.667),
    ("terrible", -1.0, 1.0), ("awful", -1.0, 1.0), ("horrible", -1.0, 1.0),
    ("worst", -1.0, 1.0), ("disgusting", -1.0, 1.0), ("disgusted", -0.8, 0.9),
    ("horrified", -0.8, 0.9), ("ugly", -0.7, 1.0), ("boring", -1.0, 1.0),
    ("lonely", -0.1, 0.4), ("tired", -0.4, 0.7), ("exhausted", -0.4, 0.6),
    ("stressed", -0.5, 0.6), ("overwhelmed", -0.3, 0.6), ("tense", -0.3, 0.6),
    ("upset", -0.5, 0.6), ("disappointed", -0.75, 0.75), ("miserable", -1.0, 1.0),
    ("dead", -0.2, 0.4), ("died", -0.6, 0.6), ("lost", -0.3, 0.3),
    ("miss", -0.3, 0.5), ("ruined", -0.6, 0.8), ("devastated", -0.8, 0.9),
    ("devastating", -0.8, 0.9), ("disaster", -0.7, 0.8), ("tragic", -0.75, 0.75),
    ("hopeless", -0.9, 1.0), ("helpless", -0.6, 0.9), ("worthless", -0.8, 0.9),
    ("useless", -0.5, 0.2), ("broken", -0.4, 0.4), ("lonesome", -0.5, 0.5),
    ("unhappy", -0.6, 0.9), ("sorry", -0.5, 1.0), ("poor", -0.4, 0.6),
    ("wrong", -0.5, 0.9), ("worse", -0.4, 0.6), ("stupid", -0.8, 1.0),
    ("pathetic", -1.0, 1.0), ("dreadful", -1.0, 1.0), ("cruel", -1.0, 1.0),
    ("evil", -1.0, 1.0), ("dangerous", -0.6, 0.9), ("guilty", -0.5, 0.7),
    ("ashamed", -0.6, 0.9), ("jealous", -0.4, 0.7), ("gross", -0.8, 1.0),
    ("sweet", 0.35, 0.65), ("kind", 0.6, 0.9), ("friendly", 0.375, 0.5),
    ("lucky", 0.33, 1.0), ("incredible", 0.9, 0.9), ("superb", 1.0, 1.0),
    ("gorgeous", 0.7, 0.7), ("pleased", 0.5, 1.0), ("satisfied", 0.5, 1.0),
    ("successful", 0.75, 0.95), ("confident", 0.5, 0.8), ("thankful", 0.5, 0.8),
    ("better", 0.5, 0.5), ("fine", 0.4, 0.5), ("cool", 0.35, 0.65),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3), ("really", 1.3), ("so", 1.3), ("super", 1.3), ("totally", 1.3),
    ("extremely", 1.5), ("incredibly", 1.5), ("absolutely", 1.5), ("quite", 1.1),
    ("somewhat", 0.8), ("slightly", 0.7),
];

const NEGATIONS: &[&str] = &[
    "not", "never", "no", "dont", "doesnt", "didnt", "isnt", "wasnt", "arent", "cant",
    "cannot", "wont",
];

/// Polarity and subjectivity of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Adjective-lexicon polarity/subjectivity estimator
#[derive(Debug, Clone)]
pub struct PolarityEstimator {
    lexicon: HashMap<&'static str, (f64, f64)>,
    intensifiers: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl PolarityEstimator {
    pub fn new() -> Self {
        Self {
            lexicon: POLARITY_LEXICON
                .iter()
                .map(|(word, polarity, subjectivity)| (*word, (*polarity, *subjectivity)))
                .collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
        }
    }

    /// Score normalized text
    pub fn score(&self, text: &str) -> PolarityScores {
        let mut assessments: Vec<(f64, f64)> = Vec::new();
        let mut intensity = 1.0;
        let mut negated = false;

        for token in tokenize(text) {
            if let Some(factor) = self.intensifiers.get(token) {
                intensity = *factor;
                continue;
            }
            if self.negations.contains(token) {
                negated = true;
                continue;
            }

            if let Some(&(polarity, subjectivity)) = self.lexicon.get(token) {
                let mut polarity = polarity * intensity;
                if negated {
                    polarity *= NEGATION_FACTOR;
                }
                assessments.push((
                    polarity.clamp(-1.0, 1.0),
                    (subjectivity * intensity).clamp(0.0, 1.0),
                ));
                negated = false;
            }
            intensity = 1.0;
        }

        if assessments.is_empty() {
            return PolarityScores {
                polarity: 0.0,
                subjectivity: 0.0,
            };
        }

        let n = assessments.len() as f64;
        let polarity = assessments.iter().map(|(p, _)| p).sum::<f64>() / n;
        let subjectivity = assessments.iter().map(|(_, s)| s).sum::<f64>() / n;

        PolarityScores {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}

impl Default for PolarityEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_no_hits_is_zero() {
        let estimator = PolarityEstimator::new();
        let scores = estimator.score("i feel nothing in particular today");

        assert_eq!(scores.polarity, 0.0);
        assert_eq!(scores.subjectivity, 0.0);
    }

    #[test]
    fn test_mean_over_assessments() {
        let estimator = PolarityEstimator::new();
        let scores = estimator.score("good and bad");

        assert!(approx(scores.polarity, 0.0));
        assert!(approx(scores.subjectivity, (0.6 + 0.667) / 2.0));
    }

    #[test]
    fn test_intensifier_applies_to_next_word_only() {
        let estimator = PolarityEstimator::new();
        let scores = estimator.score("very good, not great");

        // 0.7 * 1.3 = 0.91 ; 0.8 * -0.5 = -0.4
        assert!(approx(scores.polarity, (0.91 - 0.4) / 2.0));
    }

    #[test]
    fn test_values_are_clamped() {
        let estimator = PolarityEstimator::new();
        let scores = estimator.score("extremely wonderful");

        assert!(approx(scores.polarity, 1.0));
        assert!(approx(scores.subjectivity, 1.0));
    }

    #[test]
    fn test_negation_reverses_and_dampens() {
        let estimator = PolarityEstimator::new();
        let scores = estimator.score("not terrible");

        assert!(approx(scores.polarity, 0.5));
    }
}
