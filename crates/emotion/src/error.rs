//! Error types for the emotion crate.
//!
//! Callers of [`EmotionAnalyzer::analyze`](crate::EmotionAnalyzer::analyze)
//! only ever see `None`; these variants exist so the cause can be logged
//! and inspected through `try_analyze`.

use thiserror::Error;

/// Errors that can occur while building or running the analyzer
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Text was blank after trimming
    #[error("Input text is empty")]
    EmptyInput,

    /// A built-in pattern failed to compile
    #[error("Invalid pattern for {context}: {source}")]
    Pattern {
        context: String,
        #[source]
        source: regex::Error,
    },

    /// A sentiment signal came out as NaN or infinity
    #[error("Non-finite {signal} score")]
    NonFiniteScore { signal: &'static str },

    /// A label outside the fixed emotion set
    #[error("Unknown emotion label: {0}")]
    UnknownEmotion(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, AnalysisError>;
