//! Rule-based valence estimator.
//!
//! ## Algorithm
//! 1. Look every token up in a valence lexicon (-4..4 scale); misses score 0
//! 2. Boosters/dampeners up to three tokens back nudge the valence by
//!    ±0.293, scaled by 1.0 / 0.95 / 0.9 with distance
//! 3. A negation word up to three tokens back flips and dampens (×-0.74)
//! 4. "but" halves everything before it and amplifies everything after (×1.5)
//! 5. Exclamation and question marks add emphasis in the dominant direction
//! 6. compound = s / sqrt(s² + 15); proportions come from the shifted
//!    positive and negative sums plus the count of neutral tokens

use super::{round_to, tokenize};
use crate::types::SentimentScores;
use std::collections::{HashMap, HashSet};

const BOOSTER_INCREMENT: f64 = 0.293;
const BOOSTER_DECREMENT: f64 = -0.293;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZE_ALPHA: f64 = 15.0;
const EXCLAMATION_WEIGHT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_WEIGHT: f64 = 0.18;
const MAX_QUESTION_EMPHASIS: f64 = 0.96;
const LOOKBACK_SCALES: [f64; 3] = [1.0, 0.95, 0.9];

const VALENCE_LEXICON: &[(&str, f64)] = &[
    // positive
    ("happy", 2.7), ("excited", 1.4), ("thrilled", 2.2), ("joyful", 2.9),
    ("elated", 3.2), ("cheerful", 2.5), ("delighted", 3.2), ("euphoric", 3.1),
    ("upbeat", 1.5), ("optimistic", 1.3), ("love", 3.2), ("loved", 2.9),
    ("adore", 2.8), ("cherish", 2.6), ("romantic", 2.1), ("passionate", 2.4),
    ("wonderful", 2.7), ("beautiful", 2.9), ("great", 3.1), ("good", 1.9),
    ("best", 3.2), ("amazing", 2.8), ("awesome", 3.1), ("excellent", 2.7),
    ("fantastic", 2.6), ("nice", 1.8), ("glad", 2.0), ("fun", 2.3),
    ("enjoy", 2.2), ("enjoyed", 2.3), ("calm", 1.3), ("peaceful", 2.2),
    ("relaxed", 2.2), ("serene", 2.0), ("hopeful", 1.9), ("hope", 1.9),
    ("eager", 1.5), ("enthusiastic", 1.9), ("grateful", 2.0), ("proud", 2.1),
    ("smile", 1.5), ("laugh", 2.6), ("win", 2.8), ("perfect", 2.7),
    ("thanks", 1.9), ("amazed", 2.2), ("lovely", 2.8), ("blessed", 2.9),
    ("celebrate", 2.7), ("brilliant", 2.8),
    // negative
    ("sad", -2.1), ("depressed", -2.3), ("melancholy", -1.9), ("grief", -2.2),
    ("sorrow", -2.4), ("heartbroken", -2.5), ("gloomy", -1.8), ("dejected", -2.2),
    ("angry", -2.3), ("furious", -2.7), ("irritated", -1.8), ("mad", -2.2),
    ("rage", -2.6), ("frustrated", -2.2), ("annoyed", -1.6), ("outraged", -2.3),
    ("hostile", -2.2), ("livid", -2.6), ("scared", -2.2), ("afraid", -2.0),
    ("terrified", -3.0), ("anxious", -1.0), ("worried", -1.2), ("nervous", -1.2),
    ("panic", -2.3), ("frightened", -2.0), ("uneasy", -1.6), ("disgusted", -2.5),
    ("horrified", -2.5), ("appalled", -2.0), ("sick", -1.9), ("stressed", -1.4),
    ("overwhelmed", -1.5), ("exhausted", -1.5), ("tense", -1.4), ("pressure", -1.2),
    ("burden", -1.9), ("bad", -2.5), ("terrible", -2.5), ("awful", -2.0),
    ("horrible", -2.5), ("hate", -2.7), ("sucks", -1.5), ("worst", -3.1),
    ("lonely", -2.0), ("cry", -2.1), ("crying", -2.1), ("hurt", -2.4),
    ("pain", -2.3), ("tired", -1.9), ("boring", -1.3), ("ugly", -2.3),
    ("fail", -2.5), ("failed", -2.3), ("upset", -1.6), ("disappointed", -1.9),
    ("fear", -2.2), ("shocked", -1.3), ("miserable", -2.9),
    // loss and grief
    ("died", -2.6), ("dead", -3.3), ("death", -2.9), ("die", -2.9),
    ("dying", -2.9), ("killed", -3.5), ("funeral", -1.5), ("loss", -1.3),
    ("lost", -1.3), ("lose", -1.7), ("losing", -1.6), ("miss", -0.6),
    ("missed", -1.2), ("missing", -1.2), ("mourn", -1.8), ("mourning", -1.9),
    ("grieving", -2.3), ("tragic", -3.4), ("tragedy", -3.4), ("alone", -1.0),
    ("broken", -2.1), ("empty", -0.8), ("tears", -0.9), ("weep", -2.3),
    ("sorry", -0.3), ("unhappy", -1.8), ("hopeless", -2.0), ("helpless", -2.0),
    ("worthless", -1.9), ("useless", -1.8), ("regret", -1.8), ("despair", -2.1),
    ("suffering", -2.1), ("suffer", -2.5), ("agony", -2.5), ("lonesome", -1.5),
    // harm and failure
    ("disaster", -3.1), ("devastated", -3.1), ("devastating", -3.3),
    ("ruined", -2.1), ("ruin", -2.7), ("destroyed", -3.4), ("catastrophe", -3.4),
    ("fired", -2.0), ("failure", -2.3), ("failing", -2.3), ("wrong", -2.1),
    ("problem", -1.7), ("trouble", -1.7), ("crisis", -3.1), ("mess", -1.5),
    ("damage", -2.2), ("injured", -1.7), ("accident", -2.1), ("sucked", -2.0),
    ("poor", -2.1), ("crap", -1.6), ("stupid", -2.4), ("pathetic", -2.6),
    ("worse", -2.1), ("nightmare", -2.6), ("dreadful", -2.7), ("dread", -2.0),
    ("abandoned", -1.9), ("betrayed", -3.2), ("rejected", -1.7), ("humiliated", -2.6),
    ("ashamed", -2.1), ("guilty", -1.8), ("embarrassed", -1.5), ("jealous", -2.0),
    ("hated", -3.2), ("hatred", -3.4), ("disgusting", -2.4), ("gross", -2.1),
    ("cruel", -2.8), ("evil", -3.4), ("violent", -2.9), ("abuse", -3.2),
    ("threat", -2.4), ("danger", -2.4), ("dangerous", -2.1), ("hurts", -2.1),
    ("ache", -1.6), ("ill", -1.8), ("cancer", -3.4), ("war", -2.9),
    // warmth and success
    ("joy", 2.8), ("happiness", 2.6), ("success", 2.7), ("winning", 2.4),
    ("successful", 2.8), ("won", 2.7), ("kind", 2.4), ("glorious", 2.6),
    ("sweet", 2.0), ("friendly", 2.2), ("comfort", 1.5), ("safe", 1.9),
    ("free", 2.3), ("relief", 2.1), ("relieved", 1.6), ("pleased", 1.9),
    ("satisfied", 1.8), ("content", 1.5), ("better", 1.9), ("fine", 0.8),
    ("cool", 1.3), ("yay", 2.4), ("hug", 2.1), ("hugs", 2.2),
    ("kiss", 1.8), ("friend", 2.2), ("friends", 2.1), ("heaven", 2.7),
    ("paradise", 3.2), ("magnificent", 2.4), ("incredible", 2.6), ("superb", 3.1),
    ("inspired", 2.2), ("inspiring", 2.4), ("confident", 2.2), ("strong", 2.3),
    ("fortunate", 1.9), ("lucky", 2.0), ("thankful", 2.7), ("gorgeous", 3.0),
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOSTER_INCREMENT), ("completely", BOOSTER_INCREMENT),
    ("deeply", BOOSTER_INCREMENT), ("especially", BOOSTER_INCREMENT),
    ("extremely", BOOSTER_INCREMENT), ("highly", BOOSTER_INCREMENT),
    ("incredibly", BOOSTER_INCREMENT), ("really", BOOSTER_INCREMENT),
    ("so", BOOSTER_INCREMENT), ("super", BOOSTER_INCREMENT),
    ("totally", BOOSTER_INCREMENT), ("truly", BOOSTER_INCREMENT),
    ("very", BOOSTER_INCREMENT), ("barely", BOOSTER_DECREMENT),
    ("hardly", BOOSTER_DECREMENT), ("kinda", BOOSTER_DECREMENT),
    ("slightly", BOOSTER_DECREMENT), ("somewhat", BOOSTER_DECREMENT),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "nowhere", "neither", "nor",
    "cannot", "cant", "dont", "doesnt", "didnt", "isnt", "wasnt", "arent", "werent",
    "wont", "wouldnt", "shouldnt", "couldnt", "aint", "without",
];

/// Lexicon and rule based sentiment estimator
#[derive(Debug, Clone)]
pub struct ValenceEstimator {
    lexicon: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl ValenceEstimator {
    pub fn new() -> Self {
        Self {
            lexicon: VALENCE_LEXICON.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
        }
    }

    /// Valence of a single word, if it is in the lexicon
    pub fn valence_of(&self, word: &str) -> Option<f64> {
        self.lexicon.get(word).copied()
    }

    /// Score normalized text
    pub fn score(&self, text: &str) -> SentimentScores {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return SentimentScores::neutral();
        }

        let mut sentiments: Vec<f64> = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| self.token_valence(&tokens, i, token))
            .collect();

        apply_but_contrast(&tokens, &mut sentiments);

        let emphasis = punctuation_emphasis(text);
        let mut sum: f64 = sentiments.iter().sum();
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }

        let compound = (sum / (sum * sum + NORMALIZE_ALPHA).sqrt()).clamp(-1.0, 1.0);
        let (positive, negative, neutral) = proportions(&sentiments, emphasis);

        SentimentScores {
            compound: round_to(compound, 4),
            positive: round_to(positive, 3),
            negative: round_to(negative, 3),
            neutral: round_to(neutral, 3),
        }
    }

    fn token_valence(&self, tokens: &[&str], index: usize, token: &str) -> f64 {
        let Some(mut valence) = self.valence_of(token) else {
            return 0.0;
        };

        for (distance, scale) in LOOKBACK_SCALES.iter().enumerate().map(|(d, s)| (d + 1, *s)) {
            if index < distance {
                break;
            }
            if let Some(boost) = self.boosters.get(tokens[index - distance]) {
                let scalar = boost * scale;
                valence += if valence > 0.0 { scalar } else { -scalar };
            }
        }

        let window_start = index.saturating_sub(LOOKBACK_SCALES.len());
        if tokens[window_start..index]
            .iter()
            .any(|prev| self.negations.contains(prev))
        {
            valence *= NEGATION_SCALAR;
        }

        valence
    }
}

impl Default for ValenceEstimator {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_but_contrast(tokens: &[&str], sentiments: &mut [f64]) {
    let Some(pivot) = tokens.iter().position(|token| *token == "but") else {
        return;
    };
    for (i, sentiment) in sentiments.iter_mut().enumerate() {
        if i < pivot {
            *sentiment *= 0.5;
        } else if i > pivot {
            *sentiment *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();

    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2..=3 => questions as f64 * QUESTION_WEIGHT,
        _ => MAX_QUESTION_EMPHASIS,
    };

    exclamations as f64 * EXCLAMATION_WEIGHT + question_emphasis
}

fn proportions(sentiments: &[f64], emphasis: f64) -> (f64, f64, f64) {
    let mut positive_sum = 0.0;
    let mut negative_sum = 0.0;
    let mut neutral_count = 0.0;

    for &sentiment in sentiments {
        if sentiment > 0.0 {
            positive_sum += sentiment + 1.0;
        } else if sentiment < 0.0 {
            negative_sum += sentiment - 1.0;
        } else {
            neutral_count += 1.0;
        }
    }

    if positive_sum > negative_sum.abs() {
        positive_sum += emphasis;
    } else if positive_sum < negative_sum.abs() {
        negative_sum -= emphasis;
    }

    let total = positive_sum + negative_sum.abs() + neutral_count;
    if total == 0.0 {
        return (0.0, 0.0, 1.0);
    }

    (
        (positive_sum / total).abs(),
        (negative_sum / total).abs(),
        (neutral_count / total).abs(),
    )
}
