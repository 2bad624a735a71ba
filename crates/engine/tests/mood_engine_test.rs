//! End-to-end tests: text in, bundle out.
//!
//! Real providers are pointed at in-process axum servers serving canned
//! TMDB and YouTube payloads.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Json;
use emotion::{Emotion, EmotionAnalyzer};
use engine::{
    EngineConfig, MoodEngine, ProviderSettings, RecommendationOrchestrator, Strategy, Tier,
};
use serde_json::{Value, json};
use sources::{CuratedMovieProvider, TmdbMovieProvider, YoutubeVideoProvider};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

const HAPPY_TEXT: &str = "I am so happy and excited, this is the best day!";
const TIMEOUT: Duration = Duration::from_secs(5);

async fn start_mock_server(router: Router) -> (String, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");

    let addr = listener.local_addr().expect("Failed to get local address");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Mock server failed");
    });

    (format!("http://{}", addr), handle)
}

async fn three_videos() -> Json<Value> {
    let items: Vec<Value> = ["y1", "y2", "y3"]
        .iter()
        .map(|id| {
            json!({
                "id": { "videoId": id },
                "snippet": { "title": format!("Video {}", id), "channelTitle": "Mock" }
            })
        })
        .collect();
    Json(json!({ "items": items }))
}

async fn start_youtube() -> (String, tokio::task::JoinHandle<()>) {
    start_mock_server(Router::new().route("/search", get(three_videos))).await
}

fn youtube(addr: &str) -> YoutubeVideoProvider {
    YoutubeVideoProvider::new(Some("yt-key".to_string()), TIMEOUT)
        .unwrap()
        .with_base_url(addr)
}

// ============================================================================
// Analysis
// ============================================================================

#[tokio::test]
async fn test_blank_text_is_not_analyzed() {
    let engine = MoodEngine::from_settings(
        &ProviderSettings::new(TIMEOUT),
        EngineConfig::default(),
    )
    .unwrap();

    assert!(engine.analyze_emotion("").is_none());
    assert!(engine.analyze_emotion("   ").is_none());
}

// ============================================================================
// Recommendations
// ============================================================================

#[tokio::test]
async fn test_happy_text_gets_curated_movies_and_videos() {
    let (addr, handle) = start_youtube().await;
    let orchestrator = RecommendationOrchestrator::new(
        Arc::new(CuratedMovieProvider::new()),
        Arc::new(youtube(&addr)),
    );
    let engine = MoodEngine::new(orchestrator).unwrap();

    let result = engine.analyze_emotion(HAPPY_TEXT).unwrap();
    assert_eq!(result.primary_emotion, Emotion::Joy);

    let bundle = engine.get_recommendations(&result).await.unwrap();

    assert_eq!(bundle.strategy, Strategy::Emotional);
    assert_eq!(bundle.movies.len(), 3);
    assert_eq!(bundle.movies[0].title, "The Grand Budapest Hotel");
    let video_ids: Vec<&str> = bundle.videos.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(video_ids, vec!["y1", "y2", "y3"]);
    assert!(bundle.reasoning.starts_with("Since you're feeling joyful"));
    assert!(bundle.reasoning.contains("hints of anticipation"));
    assert!(bundle.issues.is_empty());

    handle.abort();
}

#[tokio::test]
async fn test_broken_movie_provider_still_yields_videos() {
    let (yt_addr, yt_handle) = start_youtube().await;
    let (tmdb_addr, tmdb_handle) = start_mock_server(
        Router::new()
            .route("/discover/movie", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route("/search/movie", get(|| async { StatusCode::INTERNAL_SERVER_ERROR })),
    )
    .await;

    let tmdb = TmdbMovieProvider::new(Some("tmdb-key".to_string()), TIMEOUT)
        .unwrap()
        .with_base_url(tmdb_addr);
    let orchestrator = RecommendationOrchestrator::new(Arc::new(tmdb), Arc::new(youtube(&yt_addr)));
    let engine = MoodEngine::with_analyzer(EmotionAnalyzer::new().unwrap(), orchestrator);

    let result = engine.analyze_emotion(HAPPY_TEXT).unwrap();
    let bundle = engine.get_recommendations(&result).await.unwrap();

    assert!(bundle.movies.is_empty());
    assert_eq!(bundle.videos.len(), 3);
    assert_eq!(bundle.strategy, Strategy::Emotional);
    assert!(bundle.has_core_content());

    // Primary joy and secondary anticipation both failed for movies
    assert_eq!(bundle.issues.len(), 2);
    assert!(bundle.issues.iter().all(|i| i.provider == "tmdb"));
    assert_eq!(bundle.issues[0].tier, Tier::Primary);
    assert!(bundle.issues[0].cause.contains("500"));

    yt_handle.abort();
    tmdb_handle.abort();
}

#[tokio::test]
async fn test_unconfigured_engine_serves_curated_movies_only() {
    let engine = MoodEngine::from_settings(
        &ProviderSettings::new(TIMEOUT),
        EngineConfig::default(),
    )
    .unwrap();

    let result = engine.analyze_emotion(HAPPY_TEXT).unwrap();
    let bundle = engine.get_recommendations(&result).await.unwrap();

    assert_eq!(bundle.movies.len(), 3);
    assert!(bundle.videos.is_empty());
    assert!(bundle.music.is_empty());
    assert!(bundle.issues.iter().all(|i| i.provider == "youtube"));
    assert!(bundle.issues[0].cause.contains("Missing credentials"));
}

#[tokio::test]
async fn test_nothing_available_returns_none() {
    let (tmdb_addr, tmdb_handle) = start_mock_server(
        Router::new()
            .route("/discover/movie", get(|| async { Json(json!({ "results": [] })) }))
            .route("/search/movie", get(|| async { Json(json!({ "results": [] })) })),
    )
    .await;

    let tmdb = TmdbMovieProvider::new(Some("tmdb-key".to_string()), TIMEOUT)
        .unwrap()
        .with_base_url(tmdb_addr);
    let videos = YoutubeVideoProvider::new(None, TIMEOUT).unwrap();
    let engine = MoodEngine::new(RecommendationOrchestrator::new(Arc::new(tmdb), Arc::new(videos)))
        .unwrap();

    let result = engine.analyze_emotion("I feel nothing in particular today").unwrap();
    assert!(engine.get_recommendations(&result).await.is_none());

    tmdb_handle.abort();
}
