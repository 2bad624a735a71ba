//! Orchestrator configuration and provider credentials.

use sources::SpotifyCredentials;
use std::time::Duration;

/// Per-content-type item counts for one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierLimits {
    pub movies: usize,
    pub videos: usize,
    pub music: usize,
}

impl TierLimits {
    pub const fn new(movies: usize, videos: usize, music: usize) -> Self {
        Self {
            movies,
            videos,
            music,
        }
    }
}

/// Limits and timeouts used by [`RecommendationOrchestrator`](crate::RecommendationOrchestrator).
///
/// The primary limits double as the caps on the final bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Items requested for the primary emotion
    pub primary: TierLimits,
    /// Items requested per secondary emotion
    pub secondary: TierLimits,
    /// Keyword search size for movies in the last-resort fallback
    pub fallback_movies: usize,
    /// Trending size for videos in the last-resort fallback
    pub fallback_videos: usize,
    /// Upper bound on a single provider call
    pub call_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            primary: TierLimits::new(6, 8, 10),
            secondary: TierLimits::new(3, 4, 5),
            fallback_movies: 3,
            fallback_videos: 5,
            call_timeout: Duration::from_secs(10),
        }
    }
}

impl EngineConfig {
    pub fn with_primary_limits(mut self, limits: TierLimits) -> Self {
        self.primary = limits;
        self
    }

    pub fn with_secondary_limits(mut self, limits: TierLimits) -> Self {
        self.secondary = limits;
        self
    }

    pub fn with_fallback_limits(mut self, movies: usize, videos: usize) -> Self {
        self.fallback_movies = movies;
        self.fallback_videos = videos;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }
}

/// Credentials and transport settings used to wire up the real providers
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    /// Without a key the curated offline catalog serves movies
    pub tmdb_api_key: Option<String>,
    pub youtube_api_key: Option<String>,
    /// Music is only recommended when these are present
    pub spotify: Option<SpotifyCredentials>,
    /// HTTP timeout for each request a provider makes
    pub http_timeout: Duration,
}

impl ProviderSettings {
    pub fn new(http_timeout: Duration) -> Self {
        Self {
            http_timeout,
            ..Self::default()
        }
    }

    pub fn with_tmdb_api_key(mut self, key: Option<String>) -> Self {
        self.tmdb_api_key = key.filter(|k| !k.is_empty());
        self
    }

    pub fn with_youtube_api_key(mut self, key: Option<String>) -> Self {
        self.youtube_api_key = key.filter(|k| !k.is_empty());
        self
    }

    pub fn with_spotify(mut self, client_id: Option<String>, client_secret: Option<String>) -> Self {
        self.spotify = match (client_id, client_secret) {
            (Some(client_id), Some(client_secret))
                if !client_id.is_empty() && !client_secret.is_empty() =>
            {
                Some(SpotifyCredentials {
                    client_id,
                    client_secret,
                })
            }
            _ => None,
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = EngineConfig::default();

        assert_eq!(config.primary, TierLimits::new(6, 8, 10));
        assert_eq!(config.secondary, TierLimits::new(3, 4, 5));
        assert_eq!((config.fallback_movies, config.fallback_videos), (3, 5));
        assert_eq!(config.call_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_builder_overrides() {
        let config = EngineConfig::default()
            .with_primary_limits(TierLimits::new(1, 2, 0))
            .with_call_timeout(Duration::from_millis(250));

        assert_eq!(config.primary.videos, 2);
        assert_eq!(config.secondary, TierLimits::new(3, 4, 5));
        assert_eq!(config.call_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_provider_settings_ignore_blank_credentials() {
        let settings = ProviderSettings::new(Duration::from_secs(10))
            .with_tmdb_api_key(Some(String::new()))
            .with_youtube_api_key(Some("yt".to_string()))
            .with_spotify(Some("id".to_string()), None);

        assert!(settings.tmdb_api_key.is_none());
        assert_eq!(settings.youtube_api_key.as_deref(), Some("yt"));
        assert!(settings.spotify.is_none());

        let settings = settings.with_spotify(Some("id".to_string()), Some("secret".to_string()));
        assert_eq!(
            settings.spotify.map(|c| c.client_id),
            Some("id".to_string())
        );
    }
}
