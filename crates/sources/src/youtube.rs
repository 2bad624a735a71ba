//! YouTube Data API video provider.

use crate::error::{ProviderError, Result};
use crate::http::{build_client, read_json, trim_base_url};
use crate::traits::ContentProvider;
use crate::types::{ContentItem, ContentKind, dedup_by_id};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use emotion::Emotion;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const PROVIDER: &str = "youtube";

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

const QUERIES_PER_FETCH: usize = 3;
const VIDEOS_PER_QUERY: usize = 3;
/// Searches only consider videos published within this window
const RECENCY_DAYS: i64 = 365;

/// Search phrases for an emotion, best first
pub fn queries_for(emotion: Emotion) -> [&'static str; 5] {
    match emotion {
        Emotion::Joy => ["feel good music", "happy songs", "uplifting videos", "comedy sketches", "funny moments"],
        Emotion::Sadness => ["sad songs", "emotional music", "comfort videos", "healing music", "therapeutic content"],
        Emotion::Anger => ["rock music", "intense workouts", "motivational speeches", "rage room", "metal music"],
        Emotion::Fear => ["relaxing music", "meditation", "calming sounds", "anxiety relief", "peaceful nature"],
        Emotion::Surprise => ["amazing facts", "mind blowing", "incredible moments", "wow videos", "surprising discoveries"],
        Emotion::Disgust => ["satisfying videos", "cleaning videos", "organizing", "fresh content", "renewal videos"],
        Emotion::Love => ["romantic songs", "love songs", "relationship advice", "heartwarming stories", "couples content"],
        Emotion::Anticipation => ["upcoming releases", "exciting news", "adventure videos", "travel vlogs", "new discoveries"],
        Emotion::Calm => ["meditation music", "nature sounds", "peaceful videos", "relaxing content", "zen music"],
        Emotion::Stress => ["stress relief", "relaxation techniques", "comedy videos", "funny animals", "meditation"],
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: SearchId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Deserialize)]
struct SearchId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Deserialize)]
struct VideoItem {
    id: String,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    description: Option<String>,
    channel_title: Option<String>,
    published_at: Option<String>,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Deserialize, Default)]
struct Thumbnails {
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
    high: Option<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    url: Option<String>,
}

impl Thumbnails {
    fn preferred_url(self) -> Option<String> {
        [self.medium, self.default, self.high]
            .into_iter()
            .flatten()
            .next()
            .and_then(|t| t.url)
    }
}

fn format_published(raw: Option<&str>) -> String {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.format("%B %d, %Y").to_string())
        .unwrap_or_else(|| "Unknown Date".to_string())
}

fn to_item(video_id: String, snippet: Snippet) -> ContentItem {
    let url = format!("https://www.youtube.com/watch?v={}", video_id);
    let published = format_published(snippet.published_at.as_deref());

    ContentItem::new(
        video_id,
        snippet.title.unwrap_or_else(|| "Unknown Title".to_string()),
        ContentKind::Video,
    )
    .with_description(
        snippet
            .description
            .unwrap_or_else(|| "No description available.".to_string()),
    )
    .with_url(url)
    .with_image_url(snippet.thumbnails.preferred_url())
    .with_detail(
        "channel",
        snippet
            .channel_title
            .unwrap_or_else(|| "Unknown Channel".to_string()),
    )
    .with_detail("published", published)
}

/// Video provider backed by the YouTube Data API v3
pub struct YoutubeVideoProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl YoutubeVideoProvider {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(PROVIDER, timeout)?,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base_url(base_url);
        self
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredentials { provider: PROVIDER })
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<ContentItem>> {
        let url = format!("{}/search", self.base_url);
        let published_after = (Utc::now() - chrono::Duration::days(RECENCY_DAYS))
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        let max_results = limit.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("key", self.api_key()?),
                ("maxResults", max_results.as_str()),
                ("order", "relevance"),
                ("safeSearch", "moderate"),
                ("videoEmbeddable", "true"),
                ("videoSyndicated", "true"),
                ("publishedAfter", published_after.as_str()),
            ])
            .send()
            .await
            .map_err(ProviderError::http(PROVIDER))?;

        let body: SearchResponse = read_json(PROVIDER, response).await?;
        Ok(body
            .items
            .into_iter()
            .filter_map(|item| {
                let id = item.id.video_id.filter(|id| !id.is_empty())?;
                Some(to_item(id, item.snippet))
            })
            .collect())
    }
}

#[async_trait]
impl ContentProvider for YoutubeVideoProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn kind(&self) -> ContentKind {
        ContentKind::Video
    }

    #[instrument(skip(self), fields(provider = PROVIDER))]
    async fn fetch(&self, emotion: Emotion, limit: usize) -> Result<Vec<ContentItem>> {
        self.api_key()?;

        let mut videos = Vec::new();
        let mut last_error = None;

        for query in queries_for(emotion).iter().take(QUERIES_PER_FETCH) {
            match self.search(query, VIDEOS_PER_QUERY).await {
                Ok(batch) => videos.extend(batch),
                Err(e) => {
                    warn!(query, error = %e, "Video search failed");
                    last_error = Some(e);
                }
            }
            if videos.len() >= limit {
                break;
            }
        }

        if videos.is_empty() {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        let videos = dedup_by_id(videos, limit);
        debug!(count = videos.len(), "Fetched videos");
        Ok(videos)
    }

    #[instrument(skip(self), fields(provider = PROVIDER))]
    async fn search_by_keyword(&self, keyword: &str, limit: usize) -> Result<Vec<ContentItem>> {
        let videos = self.search(keyword, limit).await?;
        Ok(dedup_by_id(videos, limit))
    }

    #[instrument(skip(self), fields(provider = PROVIDER))]
    async fn trending(&self, limit: usize) -> Result<Vec<ContentItem>> {
        let url = format!("{}/videos", self.base_url);
        let max_results = limit.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet,statistics"),
                ("chart", "mostPopular"),
                ("regionCode", "US"),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key()?),
                ("categoryId", "0"),
            ])
            .send()
            .await
            .map_err(ProviderError::http(PROVIDER))?;

        let body: VideosResponse = read_json(PROVIDER, response).await?;
        let videos: Vec<ContentItem> = body
            .items
            .into_iter()
            .filter(|item| !item.id.is_empty())
            .map(|item| to_item(item.id, item.snippet))
            .collect();

        debug!(count = videos.len(), "Fetched trending videos");
        Ok(dedup_by_id(videos, limit))
    }
}
