use crate::types::ProviderIssue;
use emotion::Emotion;
use thiserror::Error;

/// Errors produced by the recommendation orchestrator
#[derive(Error, Debug)]
pub enum RecommendError {
    /// Every tier, including the fallback, came back without movies or videos
    #[error("No movies or videos found for {emotion} ({} provider issues)", .issues.len())]
    BundleEmpty {
        emotion: Emotion,
        issues: Vec<ProviderIssue>,
    },
}
