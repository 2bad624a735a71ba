//! TMDB movie provider.
//!
//! Emotions map to TMDB genre ids; `fetch` runs a discover query for the
//! first two genres of the emotion and merges the results.

use crate::error::{ProviderError, Result};
use crate::http::{build_client, read_json, trim_base_url};
use crate::traits::ContentProvider;
use crate::types::{ContentItem, ContentKind, dedup_by_id};
use async_trait::async_trait;
use emotion::Emotion;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const PROVIDER: &str = "tmdb";

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Genres queried per emotion
const GENRES_PER_FETCH: usize = 2;
/// Movies requested per genre
const MOVIES_PER_GENRE: usize = 3;
/// Keyword search drops anything rated below this
const MIN_SEARCH_RATING: f64 = 6.0;

/// TMDB genre ids for an emotion, most fitting first
pub fn genre_ids_for(emotion: Emotion) -> &'static [u32] {
    match emotion {
        Emotion::Joy => &[35, 10402, 10751, 16],
        Emotion::Sadness => &[18, 10749],
        Emotion::Anger => &[28, 53, 80],
        Emotion::Fear => &[27, 53, 9648],
        Emotion::Surprise => &[878, 14, 12],
        Emotion::Disgust => &[27, 53],
        Emotion::Love => &[10749, 18, 35],
        Emotion::Anticipation => &[12, 878, 28],
        Emotion::Calm => &[99, 18, 10402],
        Emotion::Stress => &[35, 10751, 16],
    }
}

pub fn genre_name(id: u32) -> Option<&'static str> {
    let name = match id {
        28 => "Action",
        35 => "Comedy",
        80 => "Crime",
        99 => "Documentary",
        18 => "Drama",
        10751 => "Family",
        14 => "Fantasy",
        36 => "History",
        27 => "Horror",
        10402 => "Music",
        9648 => "Mystery",
        10749 => "Romance",
        878 => "Science Fiction",
        10770 => "TV Movie",
        53 => "Thriller",
        10752 => "War",
        37 => "Western",
        12 => "Adventure",
        16 => "Animation",
        _ => return None,
    };
    Some(name)
}

#[derive(Deserialize)]
struct MovieList {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

#[derive(Deserialize)]
struct TmdbMovie {
    id: u64,
    title: Option<String>,
    overview: Option<String>,
    #[serde(default)]
    vote_average: f64,
    release_date: Option<String>,
    poster_path: Option<String>,
    #[serde(default)]
    genre_ids: Vec<u32>,
}

impl TmdbMovie {
    fn rating(&self) -> f64 {
        (self.vote_average * 10.0).round() / 10.0
    }

    fn into_item(self) -> ContentItem {
        let rating = self.rating();
        let year = self
            .release_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .and_then(|d| d.split('-').next())
            .unwrap_or("N/A")
            .to_string();
        let genres: Vec<&str> = self.genre_ids.iter().filter_map(|id| genre_name(*id)).collect();
        let poster = self
            .poster_path
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}{}", IMAGE_BASE_URL, p));

        ContentItem::new(
            self.id.to_string(),
            self.title.unwrap_or_else(|| "Unknown Title".to_string()),
            ContentKind::Movie,
        )
        .with_description(
            self.overview
                .filter(|o| !o.is_empty())
                .unwrap_or_else(|| "No description available.".to_string()),
        )
        .with_url(format!("https://www.themoviedb.org/movie/{}", self.id))
        .with_image_url(poster)
        .with_detail("rating", format!("{:.1}", rating))
        .with_detail("year", year)
        .with_detail("genres", genres.join(", "))
    }
}

/// Movie provider backed by the TMDB REST API
pub struct TmdbMovieProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl TmdbMovieProvider {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(PROVIDER, timeout)?,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    /// Point the provider at a different host (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base_url(base_url);
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredentials { provider: PROVIDER })
    }

    async fn discover(&self, genre_id: u32, limit: usize) -> Result<Vec<ContentItem>> {
        let url = format!("{}/discover/movie", self.base_url);
        let genre = genre_id.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key()?),
                ("with_genres", genre.as_str()),
                ("sort_by", "popularity.desc"),
                ("vote_average.gte", "6.0"),
                ("vote_count.gte", "100"),
                ("page", "1"),
            ])
            .send()
            .await
            .map_err(ProviderError::http(PROVIDER))?;

        let list: MovieList = read_json(PROVIDER, response).await?;
        Ok(list
            .results
            .into_iter()
            .take(limit)
            .map(TmdbMovie::into_item)
            .collect())
    }
}

#[async_trait]
impl ContentProvider for TmdbMovieProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn kind(&self) -> ContentKind {
        ContentKind::Movie
    }

    #[instrument(skip(self), fields(provider = PROVIDER))]
    async fn fetch(&self, emotion: Emotion, limit: usize) -> Result<Vec<ContentItem>> {
        self.api_key()?;

        let mut movies = Vec::new();
        let mut last_error = None;

        for &genre_id in genre_ids_for(emotion).iter().take(GENRES_PER_FETCH) {
            match self.discover(genre_id, MOVIES_PER_GENRE).await {
                Ok(batch) => movies.extend(batch),
                Err(e) => {
                    warn!(genre_id, error = %e, "Genre query failed");
                    last_error = Some(e);
                }
            }
            if movies.len() >= limit {
                break;
            }
        }

        // Only surface an error when nothing at all came back
        if movies.is_empty() {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        let movies = dedup_by_id(movies, limit);
        debug!(count = movies.len(), "Fetched movies");
        Ok(movies)
    }

    #[instrument(skip(self), fields(provider = PROVIDER))]
    async fn search_by_keyword(&self, keyword: &str, limit: usize) -> Result<Vec<ContentItem>> {
        let url = format!("{}/search/movie", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key()?), ("query", keyword), ("page", "1")])
            .send()
            .await
            .map_err(ProviderError::http(PROVIDER))?;

        let list: MovieList = read_json(PROVIDER, response).await?;
        let movies: Vec<ContentItem> = list
            .results
            .into_iter()
            .take(limit)
            .filter(|m| m.rating() >= MIN_SEARCH_RATING)
            .map(TmdbMovie::into_item)
            .collect();

        debug!(count = movies.len(), "Keyword search returned movies");
        Ok(movies)
    }
}
