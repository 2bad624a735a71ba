//! Engine crate for mood-based recommendations.
//!
//! This crate contains the orchestrator that runs the provider cascade and
//! the [`MoodEngine`] facade that pairs it with the emotion analyzer.

pub mod config;
pub mod error;
pub mod mood_engine;
pub mod orchestrator;
pub mod reasoning;
pub mod types;

pub use config::{EngineConfig, ProviderSettings, TierLimits};
pub use error::RecommendError;
pub use mood_engine::MoodEngine;
pub use orchestrator::{RecommendationOrchestrator, fallback_keyword};
pub use types::{ProviderIssue, RecommendationBundle, Strategy, Tier};
