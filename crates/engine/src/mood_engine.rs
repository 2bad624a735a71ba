//! Facade pairing the emotion analyzer with the recommendation orchestrator.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use emotion::{EmotionAnalyzer, EmotionResult};
use sources::{
    ContentProvider, CuratedMovieProvider, SpotifyMusicProvider, TmdbMovieProvider,
    YoutubeVideoProvider,
};

use crate::config::{EngineConfig, ProviderSettings};
use crate::orchestrator::RecommendationOrchestrator;
use crate::types::RecommendationBundle;

/// Analyze text, then recommend content for the detected emotion
#[derive(Clone)]
pub struct MoodEngine {
    analyzer: Arc<EmotionAnalyzer>,
    orchestrator: RecommendationOrchestrator,
}

impl MoodEngine {
    /// Build an engine around an existing orchestrator
    pub fn new(orchestrator: RecommendationOrchestrator) -> Result<Self> {
        let analyzer = EmotionAnalyzer::new().context("Failed to build emotion analyzer")?;
        Ok(Self::with_analyzer(analyzer, orchestrator))
    }

    pub fn with_analyzer(analyzer: EmotionAnalyzer, orchestrator: RecommendationOrchestrator) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            orchestrator,
        }
    }

    /// Wire up the HTTP providers from credentials.
    ///
    /// Movies come from TMDB when a key is configured and from the curated
    /// catalog otherwise. Music is only added when Spotify credentials exist.
    pub fn from_settings(settings: &ProviderSettings, config: EngineConfig) -> Result<Self> {
        let movies: Arc<dyn ContentProvider> = match &settings.tmdb_api_key {
            Some(key) => Arc::new(
                TmdbMovieProvider::new(Some(key.clone()), settings.http_timeout)
                    .context("Failed to create TMDB client")?,
            ),
            None => {
                info!("No TMDB API key configured, serving curated movies");
                Arc::new(CuratedMovieProvider::new())
            }
        };

        if settings.youtube_api_key.is_none() {
            warn!("No YouTube API key configured, video recommendations will be empty");
        }
        let videos: Arc<dyn ContentProvider> = Arc::new(
            YoutubeVideoProvider::new(settings.youtube_api_key.clone(), settings.http_timeout)
                .context("Failed to create YouTube client")?,
        );

        let mut orchestrator = RecommendationOrchestrator::new(movies, videos).with_config(config);

        if let Some(credentials) = &settings.spotify {
            let music = SpotifyMusicProvider::new(Some(credentials.clone()), settings.http_timeout)
                .context("Failed to create Spotify client")?;
            orchestrator = orchestrator.with_music(Arc::new(music));
        }

        Self::new(orchestrator)
    }

    /// `None` for blank text or when analysis fails
    pub fn analyze_emotion(&self, text: &str) -> Option<EmotionResult> {
        self.analyzer.analyze(text)
    }

    /// `None` when no movies or videos could be found, even after the fallback
    pub async fn get_recommendations(&self, result: &EmotionResult) -> Option<RecommendationBundle> {
        match self.orchestrator.recommend(result).await {
            Ok(bundle) => Some(bundle),
            Err(e) => {
                warn!(error = %e, "Recommendation failed");
                None
            }
        }
    }

    pub fn analyzer(&self) -> &EmotionAnalyzer {
        &self.analyzer
    }

    pub fn orchestrator(&self) -> &RecommendationOrchestrator {
        &self.orchestrator
    }
}
