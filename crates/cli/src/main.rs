use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use emotion::{keywords_for, Emotion, EmotionResult, EMOTION_KEYWORDS};
use engine::{EngineConfig, MoodEngine, ProviderSettings, RecommendationBundle};
use sources::ContentItem;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// MoodRecs - Emotion-aware movie, video and music recommendations
#[derive(Parser)]
#[command(name = "moodrecs")]
#[command(about = "Recommend movies, videos and music that fit how you feel", long_about = None)]
struct Cli {
    /// Timeout in seconds for each provider call
    #[arg(long, global = true, default_value = "10")]
    timeout_secs: u64,

    /// TMDB API key; without one a curated movie list is used
    #[arg(long, global = true, env = "TMDB_API_KEY", hide_env_values = true)]
    tmdb_api_key: Option<String>,

    /// YouTube Data API key
    #[arg(long, global = true, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    youtube_api_key: Option<String>,

    /// Spotify client id (music is only recommended with both id and secret)
    #[arg(long, global = true, env = "SPOTIFY_CLIENT_ID", hide_env_values = true)]
    spotify_client_id: Option<String>,

    /// Spotify client secret
    #[arg(long, global = true, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    spotify_client_secret: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the emotion expressed in a piece of text
    Analyze {
        /// Text describing how you feel
        #[arg(long)]
        text: String,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze text, then recommend content for the detected emotion
    Recommend {
        /// Text describing how you feel
        #[arg(long)]
        text: String,

        /// Show how the emotion was decided and which providers failed
        #[arg(long)]
        explain: bool,

        /// Print the raw bundle as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the keywords the analyzer looks for
    Keywords {
        /// Only show keywords for this emotion
        #[arg(long)]
        emotion: Option<Emotion>,
    },

    /// Run benchmark to measure analyzer latency
    Benchmark {
        /// Number of texts to analyze
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of analyses running at once
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

impl Cli {
    fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings::new(Duration::from_secs(self.timeout_secs))
            .with_tmdb_api_key(self.tmdb_api_key.clone())
            .with_youtube_api_key(self.youtube_api_key.clone())
            .with_spotify(
                self.spotify_client_id.clone(),
                self.spotify_client_secret.clone(),
            )
    }

    fn engine_config(&self) -> EngineConfig {
        EngineConfig::default().with_call_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let engine = MoodEngine::from_settings(&cli.provider_settings(), cli.engine_config())
        .context("Failed to initialize recommendation engine")?;
    info!("Engine ready in {:?}", start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Analyze { text, json } => handle_analyze(&engine, &text, json)?,
        Commands::Recommend {
            text,
            explain,
            json,
        } => handle_recommend(&engine, &text, explain, json).await?,
        Commands::Keywords { emotion } => handle_keywords(emotion),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(engine, requests, concurrent).await?,
    }

    Ok(())
}

fn analyze(engine: &MoodEngine, text: &str) -> Result<EmotionResult> {
    if text.trim().is_empty() {
        bail!("Please describe how you feel; the text was empty");
    }
    engine
        .analyze_emotion(text)
        .context("Emotion analysis failed")
}

/// Handle the 'analyze' command
fn handle_analyze(engine: &MoodEngine, text: &str, json: bool) -> Result<()> {
    let result = analyze(engine, text)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_emotion(&result, true);
    }
    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(engine: &MoodEngine, text: &str, explain: bool, json: bool) -> Result<()> {
    let result = analyze(engine, text)?;

    let start = Instant::now();
    let bundle = engine.get_recommendations(&result).await;
    info!("Recommendations took {:?}", start.elapsed());

    if json {
        let output = serde_json::json!({
            "emotion": result,
            "recommendations": bundle,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_emotion(&result, explain);
    println!();

    match bundle {
        Some(bundle) => print_bundle(&bundle, explain),
        None => println!(
            "{}",
            "No recommendations are available right now. Please try again later.".yellow()
        ),
    }
    Ok(())
}

/// Handle the 'keywords' command
fn handle_keywords(emotion: Option<Emotion>) {
    match emotion {
        Some(emotion) => {
            println!("{}", format!("Keywords for {}:", emotion).bold().blue());
            println!("  {}", keywords_for(emotion).join(", "));
        }
        None => {
            println!("{}", "Emotion keywords:".bold().blue());
            for (emotion, keywords) in EMOTION_KEYWORDS.iter() {
                println!("{} {}", format!("{:>13}:", emotion.as_str()).green(), keywords.join(", "));
            }
        }
    }
}

const BENCHMARK_TEXTS: &[&str] = &[
    "I am so happy and excited, this is the best day!",
    "I feel nothing in particular today",
    "I hate this, it sucks",
    "Work is a lot of pressure and I feel tense",
    "Looking forward to the trip, eager and hopeful, but a little anxious",
    "I adore this wonderful and amazing gift",
];

/// Handle the 'benchmark' command
async fn handle_benchmark(engine: MoodEngine, requests: usize, concurrent: usize) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    let limiter = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    // Analysis is CPU-bound, so each request runs on the blocking pool
    let mut handles = Vec::with_capacity(requests);
    for i in 0..requests {
        let engine = engine.clone();
        let limiter = limiter.clone();
        let text = BENCHMARK_TEXTS[i % BENCHMARK_TEXTS.len()];

        handles.push(tokio::spawn(async move {
            let _permit = limiter.acquire_owned().await?;
            let elapsed = tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                engine.analyze_emotion(text);
                start.elapsed()
            })
            .await?;
            Ok::<_, anyhow::Error>(elapsed)
        }));
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = Vec::with_capacity(requests);
    for handle in handles {
        timings.push(handle.await??);
    }
    let wall_time = wall_clock.elapsed();

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / timings.len() as u32;
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / wall_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent.max(1));
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} analyses/second", throughput);

    Ok(())
}

/// Helper function to print an analysis result
fn print_emotion(result: &EmotionResult, explain: bool) {
    println!(
        "{} {} ({:.0}% confidence)",
        "Emotion:".bold().blue(),
        result.primary_emotion.to_string().green().bold(),
        result.confidence * 100.0
    );

    if !result.secondary_emotions.is_empty() {
        let secondary: Vec<&str> = result.secondary_emotions.iter().map(|e| e.as_str()).collect();
        println!("{} {}", "Also:".blue(), secondary.join(", "));
    }

    if explain {
        let sentiment = &result.sentiment_scores;
        println!(
            "   Sentiment: compound {:.3} (pos {:.3}, neg {:.3}, neu {:.3})",
            sentiment.compound, sentiment.positive, sentiment.negative, sentiment.neutral
        );
        println!(
            "   Polarity {:.2}, subjectivity {:.2}",
            result.polarity, result.subjectivity
        );
        let keywords: Vec<String> = result
            .keyword_scores
            .ranked()
            .iter()
            .map(|(emotion, count)| format!("{} x{}", emotion, count))
            .collect();
        if !keywords.is_empty() {
            println!("   Keyword hits: {}", keywords.join(", "));
        }
        println!("   Decided by: {}", result.decided_by);
    }
}

/// Helper function to format and print a bundle
fn print_bundle(bundle: &RecommendationBundle, explain: bool) {
    println!("{}", bundle.reasoning.italic());

    print_section("Movies", &bundle.movies, &["year", "rating", "genres"]);
    print_section("Videos", &bundle.videos, &["channel", "published"]);
    print_section("Music", &bundle.music, &["artist", "album"]);

    if explain {
        println!();
        println!("{} {:?}", "Strategy:".blue(), bundle.strategy);
        for issue in &bundle.issues {
            println!(
                "{} {} ({} tier): {}",
                "!".yellow(),
                issue.provider,
                issue.tier,
                issue.cause
            );
        }
    }
}

fn print_section(heading: &str, items: &[ContentItem], detail_keys: &[&str]) {
    if items.is_empty() {
        return;
    }

    println!();
    println!("{}", format!("{}:", heading).bold().blue());
    for (rank, item) in items.iter().enumerate() {
        let details: Vec<&str> = detail_keys
            .iter()
            .filter_map(|key| item.detail(key))
            .filter(|value| !value.is_empty())
            .collect();

        println!(
            "{}. {} [{}]",
            (rank + 1).to_string().green(),
            item.title.bold(),
            details.join(" | ")
        );
        if let Some(url) = item.url.as_deref().filter(|u| *u != "#") {
            println!("   {}", url.dimmed());
        }
    }
}
