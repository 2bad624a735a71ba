//! # Recommendation Orchestrator
//!
//! Turns an [`EmotionResult`] into a [`RecommendationBundle`]:
//! 1. Fetch movies, videos (and music, when configured) for the primary
//!    emotion, all three content types concurrently
//! 2. For any content type that came back empty, try the secondary emotions
//!    in order and keep the first non-empty answer
//! 3. If movies and videos are both still empty, fall back to a fixed keyword
//!    search for movies plus trending videos
//! 4. Deduplicate each list by id, cap it, and attach the reasoning text
//!
//! Every provider call runs as its own task under a timeout. A call that
//! errors, times out or panics contributes nothing and is recorded as a
//! [`ProviderIssue`]; it never fails the request.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use emotion::{Emotion, EmotionResult};
use sources::{ContentItem, ContentProvider, dedup_by_id};

use crate::config::EngineConfig;
use crate::error::RecommendError;
use crate::reasoning::{fallback_reasoning, generate_reasoning};
use crate::types::{ProviderIssue, RecommendationBundle, Strategy, Tier};

/// Search keyword used by the last-resort fallback
pub fn fallback_keyword(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Joy => "comedy",
        Emotion::Sadness => "drama",
        Emotion::Anger => "action",
        Emotion::Fear => "meditation",
        Emotion::Surprise => "amazing",
        Emotion::Disgust => "satisfying",
        Emotion::Love => "romance",
        Emotion::Anticipation => "adventure",
        Emotion::Calm => "relaxing",
        Emotion::Stress => "funny",
    }
}

/// One provider operation, owned so it can move into a spawned task
#[derive(Debug, Clone)]
enum ProviderRequest {
    Fetch(Emotion, usize),
    Search(String, usize),
    Trending(usize),
}

/// Items gathered for one content type, plus whatever went wrong on the way
#[derive(Debug, Default)]
struct Collected {
    items: Vec<ContentItem>,
    issues: Vec<ProviderIssue>,
}

/// Main orchestrator that coordinates the provider cascade
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    movies: Arc<dyn ContentProvider>,
    videos: Arc<dyn ContentProvider>,
    music: Option<Arc<dyn ContentProvider>>,
    config: EngineConfig,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator over a movie and a video provider with default limits
    pub fn new(movies: Arc<dyn ContentProvider>, videos: Arc<dyn ContentProvider>) -> Self {
        Self {
            movies,
            videos,
            music: None,
            config: EngineConfig::default(),
        }
    }

    pub fn with_music(mut self, music: Arc<dyn ContentProvider>) -> Self {
        self.music = Some(music);
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Main entry point: build the bundle for an analysis result.
    ///
    /// # Returns
    /// The bundle, or [`RecommendError::BundleEmpty`] when neither movies nor
    /// videos could be found even after the fallback
    #[instrument(skip(self, result), fields(primary = %result.primary_emotion))]
    pub async fn recommend(
        &self,
        result: &EmotionResult,
    ) -> Result<RecommendationBundle, RecommendError> {
        let start_time = Instant::now();
        let primary = result.primary_emotion;
        let secondary = result.secondary_emotions.as_slice();
        let primary_limits = self.config.primary;
        let secondary_limits = self.config.secondary;

        let music_cascade = async {
            match &self.music {
                Some(provider) => {
                    self.cascade(
                        provider,
                        primary,
                        secondary,
                        primary_limits.music,
                        secondary_limits.music,
                    )
                    .await
                }
                None => Collected::default(),
            }
        };

        let (movies, videos, music) = tokio::join!(
            self.cascade(
                &self.movies,
                primary,
                secondary,
                primary_limits.movies,
                secondary_limits.movies,
            ),
            self.cascade(
                &self.videos,
                primary,
                secondary,
                primary_limits.videos,
                secondary_limits.videos,
            ),
            music_cascade,
        );

        info!(
            movies = movies.items.len(),
            videos = videos.items.len(),
            music = music.items.len(),
            "Emotion tiers complete"
        );

        let mut issues = Vec::new();
        issues.extend(movies.issues);
        issues.extend(videos.issues);
        issues.extend(music.issues);

        let mut bundle = RecommendationBundle {
            movies: movies.items,
            videos: videos.items,
            music: music.items,
            reasoning: generate_reasoning(result),
            strategy: Strategy::Emotional,
            issues: Vec::new(),
        };

        if !bundle.has_core_content() {
            info!("No movies or videos from emotion tiers, using fallback");
            let fallback = self.fallback(primary).await;

            bundle.movies = fallback.0.items;
            bundle.videos = fallback.1.items;
            bundle.reasoning = fallback_reasoning(primary);
            bundle.strategy = Strategy::Fallback;
            issues.extend(fallback.0.issues);
            issues.extend(fallback.1.issues);
        }

        if !bundle.has_core_content() {
            warn!(
                issues = issues.len(),
                "No recommendations available after fallback"
            );
            return Err(RecommendError::BundleEmpty {
                emotion: primary,
                issues,
            });
        }

        bundle.issues = issues;

        info!(
            movies = bundle.movies.len(),
            videos = bundle.videos.len(),
            music = bundle.music.len(),
            strategy = ?bundle.strategy,
            issues = bundle.issues.len(),
            "Total time to build recommendations: {:.2?}",
            start_time.elapsed()
        );

        Ok(bundle)
    }

    /// Primary tier, then secondary emotions in order until one is non-empty
    async fn cascade(
        &self,
        provider: &Arc<dyn ContentProvider>,
        primary: Emotion,
        secondary: &[Emotion],
        primary_limit: usize,
        secondary_limit: usize,
    ) -> Collected {
        let mut collected = Collected::default();

        match self
            .guarded_call(provider, Tier::Primary, ProviderRequest::Fetch(primary, primary_limit))
            .await
        {
            Ok(items) => collected.items = dedup_by_id(items, primary_limit),
            Err(issue) => collected.issues.push(issue),
        }

        if collected.items.is_empty() {
            for &emotion in secondary {
                debug!(
                    provider = provider.name(),
                    %emotion,
                    "Primary tier empty, trying secondary emotion"
                );

                let request = ProviderRequest::Fetch(emotion, secondary_limit);
                match self.guarded_call(provider, Tier::Secondary, request).await {
                    Ok(items) => {
                        let items = dedup_by_id(items, secondary_limit);
                        if !items.is_empty() {
                            collected.items.extend(items);
                            break;
                        }
                    }
                    Err(issue) => collected.issues.push(issue),
                }
            }
        }

        collected.items = dedup_by_id(collected.items, primary_limit);
        collected
    }

    /// Keyword-searched movies and trending videos, fetched concurrently
    async fn fallback(&self, emotion: Emotion) -> (Collected, Collected) {
        let keyword = fallback_keyword(emotion);
        let movie_limit = self.config.fallback_movies;
        let video_limit = self.config.fallback_videos;

        let (movies, videos) = tokio::join!(
            self.guarded_call(
                &self.movies,
                Tier::Fallback,
                ProviderRequest::Search(keyword.to_string(), movie_limit),
            ),
            self.guarded_call(
                &self.videos,
                Tier::Fallback,
                ProviderRequest::Trending(video_limit),
            ),
        );

        let collect = |outcome: Result<Vec<ContentItem>, ProviderIssue>, limit: usize| match outcome {
            Ok(items) => Collected {
                items: dedup_by_id(items, limit),
                issues: Vec::new(),
            },
            Err(issue) => Collected {
                items: Vec::new(),
                issues: vec![issue],
            },
        };

        (collect(movies, movie_limit), collect(videos, video_limit))
    }

    /// Run one provider call in its own task, bounded by the configured timeout.
    ///
    /// Any failure is converted into a [`ProviderIssue`] for the caller to record.
    async fn guarded_call(
        &self,
        provider: &Arc<dyn ContentProvider>,
        tier: Tier,
        request: ProviderRequest,
    ) -> Result<Vec<ContentItem>, ProviderIssue> {
        let name = provider.name().to_string();
        let timeout = self.config.call_timeout;

        let mut task = tokio::spawn({
            let provider = Arc::clone(provider);
            async move {
                match request {
                    ProviderRequest::Fetch(emotion, limit) => provider.fetch(emotion, limit).await,
                    ProviderRequest::Search(keyword, limit) => {
                        provider.search_by_keyword(&keyword, limit).await
                    }
                    ProviderRequest::Trending(limit) => provider.trending(limit).await,
                }
            }
        });

        let cause = match tokio::time::timeout(timeout, &mut task).await {
            Ok(Ok(Ok(items))) => {
                debug!(provider = %name, %tier, count = items.len(), "Provider call succeeded");
                return Ok(items);
            }
            Ok(Ok(Err(e))) => e.to_string(),
            Ok(Err(join_error)) => format!("provider task failed: {}", join_error),
            Err(_) => {
                task.abort();
                format!("timed out after {:?}", timeout)
            }
        };

        warn!(provider = %name, %tier, %cause, "Provider call failed, treating as empty");
        Err(ProviderIssue {
            provider: name,
            tier,
            cause,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use emotion::{KeywordScores, SentimentScores};
    use sources::{ContentKind, ProviderError};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn result(primary: Emotion, secondary: Vec<Emotion>) -> EmotionResult {
        EmotionResult {
            primary_emotion: primary,
            confidence: 0.7,
            secondary_emotions: secondary,
            sentiment_scores: SentimentScores::neutral(),
            polarity: 0.0,
            subjectivity: 0.0,
            keyword_scores: KeywordScores::new(),
            decided_by: "test".to_string(),
        }
    }

    fn items(kind: ContentKind, ids: &[&str]) -> Vec<ContentItem> {
        ids.iter()
            .map(|id| ContentItem::new(*id, format!("Item {}", id), kind))
            .collect()
    }

    fn ids(items: &[ContentItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[derive(Clone, Copy)]
    enum Behavior {
        Answer,
        Fail,
        Hang,
        Panic,
    }

    /// Provider with canned answers that records every call it receives
    struct MockProvider {
        name: &'static str,
        kind: ContentKind,
        behavior: Behavior,
        by_emotion: HashMap<Emotion, Vec<ContentItem>>,
        search: Vec<ContentItem>,
        trending: Vec<ContentItem>,
        calls: Mutex<Vec<String>>,
    }

    impl MockProvider {
        fn new(name: &'static str, kind: ContentKind) -> Self {
            Self {
                name,
                kind,
                behavior: Behavior::Answer,
                by_emotion: HashMap::new(),
                search: Vec::new(),
                trending: Vec::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn behaving(mut self, behavior: Behavior) -> Self {
            self.behavior = behavior;
            self
        }

        fn answering(mut self, emotion: Emotion, ids: &[&str]) -> Self {
            self.by_emotion.insert(emotion, items(self.kind, ids));
            self
        }

        fn searching(mut self, ids: &[&str]) -> Self {
            self.search = items(self.kind, ids);
            self
        }

        fn with_trending(mut self, ids: &[&str]) -> Self {
            self.trending = items(self.kind, ids);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        async fn respond(&self, call: String, answer: Vec<ContentItem>) -> sources::Result<Vec<ContentItem>> {
            self.calls.lock().unwrap().push(call);
            match self.behavior {
                Behavior::Answer => Ok(answer),
                Behavior::Fail => Err(ProviderError::Status {
                    provider: "mock",
                    status: 503,
                }),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(answer)
                }
                Behavior::Panic => panic!("provider blew up"),
            }
        }
    }

    #[async_trait]
    impl ContentProvider for MockProvider {
        fn name(&self) -> &str {
            self.name
        }

        fn kind(&self) -> ContentKind {
            self.kind
        }

        async fn fetch(&self, emotion: Emotion, limit: usize) -> sources::Result<Vec<ContentItem>> {
            let answer = self.by_emotion.get(&emotion).cloned().unwrap_or_default();
            self.respond(format!("fetch:{}:{}", emotion, limit), answer).await
        }

        async fn search_by_keyword(&self, keyword: &str, limit: usize) -> sources::Result<Vec<ContentItem>> {
            self.respond(format!("search:{}:{}", keyword, limit), self.search.clone())
                .await
        }

        async fn trending(&self, limit: usize) -> sources::Result<Vec<ContentItem>> {
            self.respond(format!("trending:{}", limit), self.trending.clone())
                .await
        }
    }

    fn orchestrator(
        movies: &Arc<MockProvider>,
        videos: &Arc<MockProvider>,
    ) -> RecommendationOrchestrator {
        RecommendationOrchestrator::new(movies.clone(), videos.clone())
            .with_config(EngineConfig::default().with_call_timeout(Duration::from_millis(200)))
    }

    // ============================================================================
    // Unit Tests: primary and secondary tiers
    // ============================================================================

    #[tokio::test]
    async fn test_primary_tier_fills_bundle() {
        let movies = Arc::new(
            MockProvider::new("movies", ContentKind::Movie).answering(Emotion::Joy, &["m1", "m2"]),
        );
        let videos = Arc::new(
            MockProvider::new("videos", ContentKind::Video).answering(Emotion::Joy, &["v1"]),
        );

        let bundle = orchestrator(&movies, &videos)
            .recommend(&result(Emotion::Joy, vec![Emotion::Love]))
            .await
            .unwrap();

        assert_eq!(ids(&bundle.movies), vec!["m1", "m2"]);
        assert_eq!(ids(&bundle.videos), vec!["v1"]);
        assert!(bundle.music.is_empty());
        assert_eq!(bundle.strategy, Strategy::Emotional);
        assert!(bundle.issues.is_empty());
        assert!(bundle.reasoning.starts_with("Since you're feeling joyful"));

        // Secondary emotions are never consulted when the primary tier answers
        assert_eq!(movies.calls(), vec!["fetch:joy:6"]);
        assert_eq!(videos.calls(), vec!["fetch:joy:8"]);
    }

    #[tokio::test]
    async fn test_secondary_tier_stops_at_first_non_empty() {
        let movies = Arc::new(
            MockProvider::new("movies", ContentKind::Movie)
                .answering(Emotion::Love, &["m1"])
                .answering(Emotion::Calm, &["m2"]),
        );
        let videos = Arc::new(
            MockProvider::new("videos", ContentKind::Video).answering(Emotion::Sadness, &["v1"]),
        );

        let bundle = orchestrator(&movies, &videos)
            .recommend(&result(
                Emotion::Sadness,
                vec![Emotion::Anger, Emotion::Love],
            ))
            .await
            .unwrap();

        assert_eq!(ids(&bundle.movies), vec!["m1"]);
        assert_eq!(
            movies.calls(),
            vec!["fetch:sadness:6", "fetch:anger:3", "fetch:love:3"]
        );
        assert_eq!(videos.calls(), vec!["fetch:sadness:8"]);
        assert_eq!(bundle.strategy, Strategy::Emotional);
    }

    #[tokio::test]
    async fn test_duplicates_removed_before_limit() {
        let movies = Arc::new(MockProvider::new("movies", ContentKind::Movie).answering(
            Emotion::Joy,
            &["a", "a", "b", "a", "c", "d", "e", "f", "g", "h"],
        ));
        let videos = Arc::new(MockProvider::new("videos", ContentKind::Video));

        let bundle = orchestrator(&movies, &videos)
            .recommend(&result(Emotion::Joy, vec![]))
            .await
            .unwrap();

        assert_eq!(ids(&bundle.movies), vec!["a", "b", "c", "d", "e", "f"]);
        assert!(bundle.videos.is_empty());
    }

    // ============================================================================
    // Unit Tests: fallback
    // ============================================================================

    #[tokio::test]
    async fn test_fallback_runs_only_when_both_types_empty() {
        let movies = Arc::new(
            MockProvider::new("movies", ContentKind::Movie).searching(&["s1"]),
        );
        let videos = Arc::new(
            MockProvider::new("videos", ContentKind::Video).answering(Emotion::Fear, &["v1"]),
        );

        let bundle = orchestrator(&movies, &videos)
            .recommend(&result(Emotion::Fear, vec![]))
            .await
            .unwrap();

        assert!(bundle.movies.is_empty());
        assert_eq!(ids(&bundle.videos), vec!["v1"]);
        assert_eq!(bundle.strategy, Strategy::Emotional);
        assert_eq!(movies.calls(), vec!["fetch:fear:6"]);
    }

    #[tokio::test]
    async fn test_fallback_uses_keyword_and_trending() {
        let movies = Arc::new(
            MockProvider::new("movies", ContentKind::Movie).searching(&["s1", "s2", "s1"]),
        );
        let videos = Arc::new(
            MockProvider::new("videos", ContentKind::Video).with_trending(&["t1", "t2", "t3"]),
        );

        let bundle = orchestrator(&movies, &videos)
            .recommend(&result(Emotion::Stress, vec![Emotion::Calm]))
            .await
            .unwrap();

        assert_eq!(bundle.strategy, Strategy::Fallback);
        assert_eq!(ids(&bundle.movies), vec!["s1", "s2"]);
        assert_eq!(ids(&bundle.videos), vec!["t1", "t2", "t3"]);
        assert!(
            bundle
                .reasoning
                .starts_with("We used fallback recommendations based on stress emotion.")
        );
        assert_eq!(
            movies.calls(),
            vec!["fetch:stress:6", "fetch:calm:3", "search:funny:3"]
        );
        assert_eq!(
            videos.calls(),
            vec!["fetch:stress:8", "fetch:calm:4", "trending:5"]
        );
    }

    #[tokio::test]
    async fn test_total_failure_reports_bundle_empty() {
        let movies = Arc::new(MockProvider::new("movies", ContentKind::Movie).behaving(Behavior::Fail));
        let videos = Arc::new(MockProvider::new("videos", ContentKind::Video).behaving(Behavior::Fail));

        let err = orchestrator(&movies, &videos)
            .recommend(&result(Emotion::Anger, vec![Emotion::Fear]))
            .await
            .unwrap_err();

        let RecommendError::BundleEmpty { emotion, issues } = err;
        assert_eq!(emotion, Emotion::Anger);
        // primary + secondary + fallback, for both providers
        assert_eq!(issues.len(), 6);
        assert!(issues.iter().all(|i| i.cause.contains("503")));
        assert_eq!(issues[0].provider, "movies");
        assert_eq!(issues[0].tier, Tier::Primary);
        assert_eq!(issues[1].tier, Tier::Secondary);
    }

    // ============================================================================
    // Unit Tests: error isolation
    // ============================================================================

    #[tokio::test]
    async fn test_failing_movie_provider_does_not_affect_videos() {
        let movies = Arc::new(MockProvider::new("movies", ContentKind::Movie).behaving(Behavior::Fail));
        let videos = Arc::new(
            MockProvider::new("videos", ContentKind::Video).answering(Emotion::Joy, &["v1", "v2", "v3"]),
        );

        let bundle = orchestrator(&movies, &videos)
            .recommend(&result(Emotion::Joy, vec![]))
            .await
            .unwrap();

        assert!(bundle.movies.is_empty());
        assert_eq!(bundle.videos.len(), 3);
        assert_eq!(bundle.strategy, Strategy::Emotional);
        assert_eq!(bundle.issues.len(), 1);
        assert_eq!(bundle.issues[0].provider, "movies");
    }

    #[tokio::test]
    async fn test_timeout_is_treated_as_empty() {
        let movies = Arc::new(MockProvider::new("movies", ContentKind::Movie).behaving(Behavior::Hang));
        let videos = Arc::new(
            MockProvider::new("videos", ContentKind::Video).answering(Emotion::Calm, &["v1"]),
        );

        let started = Instant::now();
        let bundle = orchestrator(&movies, &videos)
            .recommend(&result(Emotion::Calm, vec![]))
            .await
            .unwrap();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(bundle.movies.is_empty());
        assert_eq!(ids(&bundle.videos), vec!["v1"]);
        assert!(bundle.issues[0].cause.starts_with("timed out"));
    }

    #[tokio::test]
    async fn test_panicking_provider_is_isolated() {
        let movies = Arc::new(
            MockProvider::new("movies", ContentKind::Movie).answering(Emotion::Love, &["m1"]),
        );
        let videos = Arc::new(MockProvider::new("videos", ContentKind::Video).behaving(Behavior::Panic));

        let bundle = orchestrator(&movies, &videos)
            .recommend(&result(Emotion::Love, vec![]))
            .await
            .unwrap();

        assert_eq!(ids(&bundle.movies), vec!["m1"]);
        assert!(bundle.videos.is_empty());
        assert_eq!(bundle.issues.len(), 1);
        assert_eq!(bundle.issues[0].provider, "videos");
    }

    // ============================================================================
    // Unit Tests: music
    // ============================================================================

    #[tokio::test]
    async fn test_music_is_optional_and_not_required() {
        let movies = Arc::new(MockProvider::new("movies", ContentKind::Movie));
        let videos = Arc::new(MockProvider::new("videos", ContentKind::Video));
        let music = Arc::new(
            MockProvider::new("music", ContentKind::Track).answering(Emotion::Joy, &["t1"]),
        );

        let err = orchestrator(&movies, &videos)
            .with_music(music.clone())
            .recommend(&result(Emotion::Joy, vec![]))
            .await
            .unwrap_err();

        assert!(matches!(err, RecommendError::BundleEmpty { .. }));
        assert_eq!(music.calls(), vec!["fetch:joy:10"]);
    }

    #[tokio::test]
    async fn test_music_uses_its_own_cascade() {
        let movies = Arc::new(
            MockProvider::new("movies", ContentKind::Movie).answering(Emotion::Joy, &["m1"]),
        );
        let videos = Arc::new(MockProvider::new("videos", ContentKind::Video));
        let music = Arc::new(
            MockProvider::new("music", ContentKind::Track).answering(Emotion::Anticipation, &["t1", "t2"]),
        );

        let bundle = orchestrator(&movies, &videos)
            .with_music(music.clone())
            .recommend(&result(Emotion::Joy, vec![Emotion::Anticipation]))
            .await
            .unwrap();

        assert_eq!(ids(&bundle.music), vec!["t1", "t2"]);
        assert_eq!(music.calls(), vec!["fetch:joy:10", "fetch:anticipation:5"]);
    }

    #[test]
    fn test_every_emotion_has_fallback_keyword() {
        for emotion in Emotion::ALL {
            assert!(!fallback_keyword(emotion).is_empty());
        }
    }
}
