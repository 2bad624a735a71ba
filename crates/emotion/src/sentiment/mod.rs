//! Sentiment estimators.
//!
//! Two independent estimators run over the same normalized text:
//!
//! - [`ValenceEstimator`]: lexicon and rule based; produces a compound score
//!   in [-1, 1] plus positive/negative/neutral proportions.
//! - [`PolarityEstimator`]: adjective lexicon; produces polarity in [-1, 1]
//!   and subjectivity in [0, 1].

pub mod polarity;
pub mod valence;

pub use polarity::{PolarityEstimator, PolarityScores};
pub use valence::ValenceEstimator;

/// Split normalized text into words, dropping surrounding punctuation
pub(crate) fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|token| token.trim_matches(|c: char| matches!(c, '.' | ',' | '!' | '?' | '-')))
        .filter(|token| !token.is_empty())
        .collect()
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
