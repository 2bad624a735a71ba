//! Text normalization applied before every scan.
//!
//! 1. Lowercase
//! 2. Collapse whitespace runs to a single space
//! 3. Drop everything except word characters, whitespace and `. , ! ? -`
//! 4. Trim

use crate::error::{AnalysisError, Result};
use regex::Regex;

const WHITESPACE_PATTERN: &str = r"\s+";
const DISALLOWED_PATTERN: &str = r"[^\w\s.,!?-]";

/// Compiled normalization patterns
#[derive(Debug, Clone)]
pub struct Normalizer {
    whitespace: Regex,
    disallowed: Regex,
}

impl Normalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            whitespace: compile(WHITESPACE_PATTERN, "whitespace")?,
            disallowed: compile(DISALLOWED_PATTERN, "character filter")?,
        })
    }

    /// Normalize raw user text
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let collapsed = self.whitespace.replace_all(&lowered, " ");
        let filtered = self.disallowed.replace_all(&collapsed, "");
        filtered.trim().to_string()
    }
}

pub(crate) fn compile(pattern: &str, context: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| AnalysisError::Pattern {
        context: context.to_string(),
        source,
    })
}
