//! # Sources Crate
//!
//! Content providers for mood-based recommendations.
//!
//! ## Components
//!
//! ### Movies
//! - [`TmdbMovieProvider`]: TMDB discover by emotion-mapped genres, plus
//!   keyword search for the last-resort fallback
//! - [`CuratedMovieProvider`]: static catalog used when no TMDB key is set
//!
//! ### Videos
//! - [`YoutubeVideoProvider`]: YouTube search by emotion-mapped queries, plus
//!   the trending chart for the last-resort fallback
//!
//! ### Music
//! - [`SpotifyMusicProvider`]: Spotify track search by genre × mood, with a
//!   lazily fetched client-credentials token ([`TokenCache`])
//!
//! Every provider implements [`ContentProvider`] and reports failures as
//! [`ProviderError`]; none of them panic or retry beyond the single token
//! refresh.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{ContentProvider, TmdbMovieProvider};
//! use emotion::Emotion;
//! use std::time::Duration;
//!
//! let tmdb = TmdbMovieProvider::new(Some(api_key), Duration::from_secs(10))?;
//! let movies = tmdb.fetch(Emotion::Joy, 6).await?;
//! ```

pub mod curated;
pub mod error;
mod http;
pub mod spotify;
pub mod tmdb;
pub mod token;
pub mod traits;
pub mod types;
pub mod youtube;

// Re-export commonly used types
pub use curated::CuratedMovieProvider;
pub use error::{ProviderError, Result};
pub use spotify::{SpotifyCredentials, SpotifyMusicProvider};
pub use tmdb::TmdbMovieProvider;
pub use token::TokenCache;
pub use traits::ContentProvider;
pub use types::{ContentItem, ContentKind, dedup_by_id};
pub use youtube::YoutubeVideoProvider;
