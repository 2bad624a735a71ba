//! Core trait for content providers.
//!
//! The recommendation core only ever talks to providers through this narrow
//! interface: fetch by emotion, free-text search, and trending.

use crate::error::Result;
use crate::types::{ContentItem, ContentKind};
use async_trait::async_trait;
use emotion::Emotion;

/// A source of recommendable content.
///
/// ## Design Note
/// - `Send + Sync` so a provider can be shared (`Arc<dyn ContentProvider>`)
///   across concurrently running tasks
/// - Errors are returned, never panicked; callers decide how to degrade
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Returns the name of this provider (for logging/debugging)
    fn name(&self) -> &str;

    /// The kind of content this provider returns
    fn kind(&self) -> ContentKind;

    /// Content suited to an emotion, at most `limit` items
    async fn fetch(&self, emotion: Emotion, limit: usize) -> Result<Vec<ContentItem>>;

    /// Free-text search, used only by the last-resort fallback
    async fn search_by_keyword(&self, _keyword: &str, _limit: usize) -> Result<Vec<ContentItem>> {
        Ok(Vec::new())
    }

    /// Popular content with no emotion conditioning, used only by the last-resort fallback
    async fn trending(&self, _limit: usize) -> Result<Vec<ContentItem>> {
        Ok(Vec::new())
    }
}
