//! Content items returned by providers.
//!
//! The recommendation core treats an item as an opaque payload keyed only by
//! `id`; everything else is presentation metadata.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// What kind of content an item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Movie,
    Video,
    Track,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContentKind::Movie => "movie",
            ContentKind::Video => "video",
            ContentKind::Track => "track",
        };
        f.write_str(label)
    }
}

/// A single recommendable piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Provider-assigned identifier, stable across calls
    pub id: String,
    pub title: String,
    pub kind: ContentKind,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    /// Free-form presentation metadata (year, rating, genres, channel, artist, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
}

impl ContentItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: ContentKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            description: None,
            url: None,
            image_url: None,
            details: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}

/// Drop repeated ids (first occurrence wins), then keep at most `limit` items
pub fn dedup_by_id(items: Vec<ContentItem>, limit: usize) -> Vec<ContentItem> {
    let mut seen: HashSet<String> = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str) -> ContentItem {
        ContentItem::new(id, title, ContentKind::Movie)
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_in_order() {
        let items = vec![
            item("a", "first a"),
            item("b", "b"),
            item("a", "second a"),
            item("c", "c"),
        ];

        let unique = dedup_by_id(items, 10);
        let titles: Vec<&str> = unique.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["first a", "b", "c"]);
    }

    #[test]
    fn test_dedup_applies_limit_after_removing_duplicates() {
        let items = vec![item("a", "a"), item("a", "a"), item("a", "a"), item("b", "b")];

        let unique = dedup_by_id(items, 2);
        let ids: Vec<&str> = unique.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_builder_sets_details() {
        let movie = item("1", "Paddington")
            .with_detail("year", "2014")
            .with_url("#");

        assert_eq!(movie.detail("year"), Some("2014"));
        assert_eq!(movie.detail("rating"), None);
        assert_eq!(movie.url.as_deref(), Some("#"));
    }
}
