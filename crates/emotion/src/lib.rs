//! # Emotion Crate
//!
//! Deterministic emotion analysis for free-form text. No learned model and
//! no I/O: the same text always yields the same [`EmotionResult`].
//!
//! ## Main Components
//!
//! - **normalize**: lowercasing, whitespace collapsing, character filtering
//! - **lexicon**: per-emotion keyword lists and whole-word scanning
//! - **sentiment**: a valence estimator (compound + pos/neg/neu) and a
//!   polarity/subjectivity estimator
//! - **rules** / **decision_table**: the ordered primary-emotion rules
//! - **analyzer**: [`EmotionAnalyzer`], which runs the whole thing
//!
//! ## Example Usage
//!
//! ```ignore
//! use emotion::EmotionAnalyzer;
//!
//! let analyzer = EmotionAnalyzer::new()?;
//! if let Some(result) = analyzer.analyze("I am so happy and excited!") {
//!     println!("{} ({:.0}%)", result.primary_emotion, result.confidence * 100.0);
//! }
//! ```

pub mod analyzer;
pub mod decision_table;
pub mod error;
pub mod lexicon;
pub mod normalize;
pub mod rules;
pub mod sentiment;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use analyzer::{CONFIDENCE_FLOOR, EmotionAnalyzer};
pub use decision_table::{Decision, DecisionTable};
pub use error::{AnalysisError, Result};
pub use lexicon::{EMOTION_KEYWORDS, Lexicon, keywords_for};
pub use traits::{Evidence, Rule};
pub use types::{Emotion, EmotionResult, KeywordScores, SentimentScores};
