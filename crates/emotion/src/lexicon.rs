//! Keyword lexicon and whole-word scanning.
//!
//! Each emotion owns a fixed list of words and short phrases. A scan counts
//! whole-word occurrences (`\b<keyword>\b`) of every keyword in normalized
//! text and sums them per emotion.

use crate::error::Result;
use crate::normalize::compile;
use crate::types::{Emotion, KeywordScores};
use rayon::prelude::*;
use regex::Regex;

/// Keyword lists, in canonical emotion order
pub const EMOTION_KEYWORDS: [(Emotion, &[&str]); 10] = [
    (
        Emotion::Joy,
        &[
            "happy", "excited", "thrilled", "joyful", "elated", "cheerful", "delighted",
            "euphoric", "upbeat", "optimistic",
        ],
    ),
    (
        Emotion::Sadness,
        &[
            "sad", "depressed", "down", "melancholy", "grief", "sorrow", "heartbroken",
            "dejected", "gloomy", "blue",
        ],
    ),
    (
        Emotion::Anger,
        &[
            "angry", "furious", "irritated", "mad", "rage", "frustrated", "annoyed",
            "outraged", "livid", "hostile",
        ],
    ),
    (
        Emotion::Fear,
        &[
            "scared", "afraid", "terrified", "anxious", "worried", "nervous", "panic",
            "frightened", "apprehensive", "uneasy",
        ],
    ),
    (
        Emotion::Surprise,
        &[
            "surprised", "shocked", "amazed", "astonished", "stunned", "bewildered",
            "startled", "astounded",
        ],
    ),
    (
        Emotion::Disgust,
        &[
            "disgusted", "revolted", "repulsed", "sickened", "nauseated", "appalled",
            "horrified",
        ],
    ),
    (
        Emotion::Love,
        &[
            "love", "adore", "cherish", "romantic", "affectionate", "tender", "passionate",
            "devoted", "infatuated",
        ],
    ),
    (
        Emotion::Anticipation,
        &[
            "excited", "eager", "looking forward", "anticipating", "hopeful", "expectant",
            "enthusiastic",
        ],
    ),
    (
        Emotion::Calm,
        &[
            "calm", "peaceful", "relaxed", "serene", "tranquil", "content", "balanced",
            "centered", "zen",
        ],
    ),
    (
        Emotion::Stress,
        &[
            "stressed", "overwhelmed", "pressure", "burden", "exhausted", "burned out",
            "tense", "strained",
        ],
    ),
];

/// Keywords for one emotion
pub fn keywords_for(emotion: Emotion) -> &'static [&'static str] {
    EMOTION_KEYWORDS
        .iter()
        .find(|(e, _)| *e == emotion)
        .map(|(_, keywords)| *keywords)
        .unwrap_or(&[])
}

/// Compiled whole-word matchers for every keyword
#[derive(Debug, Clone)]
pub struct Lexicon {
    patterns: Vec<(Emotion, Vec<Regex>)>,
}

impl Lexicon {
    /// Compile the built-in keyword lists
    pub fn new() -> Result<Self> {
        let patterns = EMOTION_KEYWORDS
            .iter()
            .map(|(emotion, keywords)| -> Result<(Emotion, Vec<Regex>)> {
                let compiled = keywords
                    .iter()
                    .map(|keyword| {
                        compile(
                            &format!(r"\b{}\b", regex::escape(keyword)),
                            &format!("{emotion} keyword '{keyword}'"),
                        )
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok((*emotion, compiled))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Count keyword hits per emotion in already-normalized text
    pub fn scan(&self, text: &str) -> KeywordScores {
        self.patterns
            .par_iter()
            .map(|(emotion, patterns)| {
                let count: usize = patterns
                    .iter()
                    .map(|pattern| pattern.find_iter(text).count())
                    .sum();
                (*emotion, count as u32)
            })
            .collect::<Vec<_>>()
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}
