//! Spotify track provider.
//!
//! Uses the client-credentials flow. The access token lives in a
//! [`TokenCache`] owned by the provider, so it is fetched on first use and
//! refreshed once when Spotify answers 401.

use crate::error::{ProviderError, Result};
use crate::http::{build_client, read_json, trim_base_url};
use crate::token::TokenCache;
use crate::traits::ContentProvider;
use crate::types::{ContentItem, ContentKind, dedup_by_id};
use async_trait::async_trait;
use emotion::Emotion;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const PROVIDER: &str = "spotify";

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com/api/token";

const QUERIES_PER_FETCH: usize = 3;

/// Genres and moods used to build search queries for an emotion
#[derive(Debug, Clone, Copy)]
pub struct MusicTheme {
    pub genres: [&'static str; 2],
    pub moods: [&'static str; 2],
}

pub fn theme_for(emotion: Emotion) -> MusicTheme {
    let (genres, moods) = match emotion {
        Emotion::Joy => (["pop", "dance"], ["happy", "energetic"]),
        Emotion::Sadness => (["indie", "folk"], ["sad", "melancholy"]),
        Emotion::Anger => (["rock", "metal"], ["aggressive", "intense"]),
        Emotion::Fear => (["ambient", "classical"], ["calm", "peaceful"]),
        Emotion::Love => (["r&b", "soul"], ["romantic", "loving"]),
        Emotion::Calm => (["ambient", "classical"], ["peaceful", "tranquil"]),
        Emotion::Stress => (["acoustic", "indie"], ["chill", "relaxing"]),
        Emotion::Surprise => (["electronic", "experimental"], ["eclectic", "experimental"]),
        Emotion::Anticipation => (["electronic", "rock"], ["exciting", "adventurous"]),
        Emotion::Disgust => (["indie", "alternative"], ["fresh", "clean"]),
    };
    MusicTheme { genres, moods }
}

impl MusicTheme {
    /// Every genre × mood pairing as a Spotify search query
    pub fn queries(&self) -> Vec<String> {
        self.genres
            .iter()
            .flat_map(|genre| {
                self.moods
                    .iter()
                    .map(move |mood| format!("genre:{} mood:{}", genre, mood))
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    tracks: Option<TrackPage>,
}

#[derive(Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<Track>,
}

#[derive(Deserialize)]
struct Track {
    id: String,
    name: String,
    #[serde(default)]
    artists: Vec<Artist>,
    album: Option<Album>,
    #[serde(default)]
    duration_ms: u64,
    preview_url: Option<String>,
    #[serde(default)]
    external_urls: ExternalUrls,
    #[serde(default)]
    popularity: u32,
}

#[derive(Deserialize)]
struct Artist {
    name: String,
}

#[derive(Deserialize)]
struct Album {
    name: String,
    #[serde(default)]
    images: Vec<Image>,
}

#[derive(Deserialize)]
struct Image {
    url: String,
}

#[derive(Deserialize, Default)]
struct ExternalUrls {
    spotify: Option<String>,
}

impl Track {
    fn into_item(self) -> ContentItem {
        let artists: Vec<&str> = self.artists.iter().map(|a| a.name.as_str()).collect();
        let artist = artists.join(", ");
        let (album, image_url) = match self.album {
            Some(album) => {
                let image = album.images.into_iter().next().map(|i| i.url);
                (album.name, image)
            }
            None => (String::new(), None),
        };

        let mut item = ContentItem::new(self.id, self.name, ContentKind::Track)
            .with_image_url(image_url)
            .with_detail("artist", artist)
            .with_detail("album", album)
            .with_detail("duration_ms", self.duration_ms.to_string())
            .with_detail("popularity", self.popularity.to_string());

        if let Some(url) = self.external_urls.spotify {
            item = item.with_url(url);
        }
        if let Some(preview) = self.preview_url {
            item = item.with_detail("preview_url", preview);
        }
        item
    }
}

/// Music provider backed by the Spotify Web API
pub struct SpotifyMusicProvider {
    client: Client,
    api_url: String,
    accounts_url: String,
    credentials: Option<SpotifyCredentials>,
    token: TokenCache,
}

impl SpotifyMusicProvider {
    pub fn new(credentials: Option<SpotifyCredentials>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(PROVIDER, timeout)?,
            api_url: DEFAULT_API_URL.to_string(),
            accounts_url: DEFAULT_ACCOUNTS_URL.to_string(),
            credentials: credentials
                .filter(|c| !c.client_id.is_empty() && !c.client_secret.is_empty()),
            token: TokenCache::new(),
        })
    }

    /// `api_url` is the Web API root, `accounts_url` the full token endpoint
    pub fn with_base_urls(
        mut self,
        api_url: impl Into<String>,
        accounts_url: impl Into<String>,
    ) -> Self {
        self.api_url = trim_base_url(api_url);
        self.accounts_url = accounts_url.into();
        self
    }

    pub fn token_cache(&self) -> &TokenCache {
        &self.token
    }

    fn credentials(&self) -> Result<&SpotifyCredentials> {
        self.credentials
            .as_ref()
            .ok_or(ProviderError::MissingCredentials { provider: PROVIDER })
    }

    async fn request_token(&self) -> Result<String> {
        let credentials = self.credentials()?;
        debug!("Requesting Spotify access token");

        let response = self
            .client
            .post(&self.accounts_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(ProviderError::http(PROVIDER))?;

        let body: TokenResponse = read_json(PROVIDER, response).await?;
        Ok(body.access_token)
    }

    async fn search_tracks(
        &self,
        token: String,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ContentItem>> {
        let url = format!("{}/search", self.api_url);
        let limit = limit.to_string();

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("q", query),
                ("type", "track"),
                ("limit", limit.as_str()),
                ("market", "US"),
            ])
            .send()
            .await
            .map_err(ProviderError::http(PROVIDER))?;

        let body: SearchResponse = read_json(PROVIDER, response).await?;
        Ok(body
            .tracks
            .map(|page| page.items)
            .unwrap_or_default()
            .into_iter()
            .map(Track::into_item)
            .collect())
    }
}

#[async_trait]
impl ContentProvider for SpotifyMusicProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn kind(&self) -> ContentKind {
        ContentKind::Track
    }

    #[instrument(skip(self), fields(provider = PROVIDER))]
    async fn fetch(&self, emotion: Emotion, limit: usize) -> Result<Vec<ContentItem>> {
        self.credentials()?;

        let per_query = (limit / QUERIES_PER_FETCH).max(1);
        let mut tracks = Vec::new();
        let mut last_error = None;

        for query in theme_for(emotion).queries().iter().take(QUERIES_PER_FETCH) {
            let batch = self
                .token
                .call_with_retry(
                    || self.request_token(),
                    |token| self.search_tracks(token, query, per_query),
                )
                .await;
            match batch {
                Ok(batch) => tracks.extend(batch),
                Err(e) => {
                    warn!(query = %query, error = %e, "Track query failed");
                    last_error = Some(e);
                }
            }

            if tracks.len() >= limit {
                break;
            }
        }

        if tracks.is_empty() {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        let tracks = dedup_by_id(tracks, limit);
        debug!(count = tracks.len(), "Fetched tracks");
        Ok(tracks)
    }
}
