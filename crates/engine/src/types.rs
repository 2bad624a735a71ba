//! Recommendation bundle and the bookkeeping attached to it.

use serde::Serialize;
use sources::ContentItem;
use std::fmt;

/// Which stage of the cascade produced the bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Primary or secondary emotion lookups
    Emotional,
    /// Keyword search and trending, emotion-agnostic
    Fallback,
}

/// Cascade stage a provider call belonged to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Primary,
    Secondary,
    Fallback,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::Primary => "primary",
            Tier::Secondary => "secondary",
            Tier::Fallback => "fallback",
        };
        f.write_str(label)
    }
}

/// A provider call that failed, timed out or panicked.
///
/// Recorded on the bundle so callers can tell "nothing matched" apart from
/// "the provider was down".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderIssue {
    pub provider: String,
    pub tier: Tier,
    pub cause: String,
}

/// Final recommendation returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationBundle {
    pub movies: Vec<ContentItem>,
    pub videos: Vec<ContentItem>,
    /// Only populated when a music provider is configured
    pub music: Vec<ContentItem>,
    pub reasoning: String,
    pub strategy: Strategy,
    pub issues: Vec<ProviderIssue>,
}

impl RecommendationBundle {
    /// A bundle with neither movies nor videos is never handed out
    pub fn has_core_content(&self) -> bool {
        !self.movies.is_empty() || !self.videos.is_empty()
    }

    pub fn total_items(&self) -> usize {
        self.movies.len() + self.videos.len() + self.music.len()
    }
}
