//! Human-readable explanation attached to every bundle.

use emotion::{Emotion, EmotionResult};

/// Opening sentence for each primary emotion
pub fn template_for(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Joy => "Since you're feeling joyful, we've selected uplifting content that will amplify your positive mood with comedies, feel-good stories, and energetic content.",
        Emotion::Sadness => "We understand you're going through a tough time. Here's some content that can provide comfort, emotional catharsis, or gentle distraction.",
        Emotion::Anger => "When feeling angry, sometimes you need an outlet. We've chosen intense action content and motivational material to help channel that energy positively.",
        Emotion::Fear => "To help ease your anxiety, we've selected calming and reassuring content that can provide comfort and relaxation.",
        Emotion::Surprise => "Since you're in a surprised state of mind, here's some amazing and mind-blowing content that will keep you engaged and wondering.",
        Emotion::Disgust => "We've chosen refreshing and satisfying content to help cleanse your palate and shift your focus to more positive experiences.",
        Emotion::Love => "Feeling the love! Here's romantic and heartwarming content that celebrates human connection and beautiful relationships.",
        Emotion::Anticipation => "Your excitement is contagious! We've selected thrilling and adventure-filled content to match your anticipatory energy.",
        Emotion::Calm => "Perfect time for some peaceful content. We've chosen relaxing and meditative material to maintain your zen state.",
        Emotion::Stress => "Let's help you unwind. Here's some stress-relieving content including comedy and relaxation material to help you decompress.",
    }
}

/// Qualifier for the detection confidence; both thresholds are exclusive
pub fn confidence_note(confidence: f64) -> &'static str {
    if confidence > 0.8 {
        " We're highly confident in this emotion detection."
    } else if confidence > 0.6 {
        " We're moderately confident in this assessment."
    } else {
        " We've made our best guess based on your input."
    }
}

/// Reasoning for bundles built from the emotion lookups
pub fn generate_reasoning(result: &EmotionResult) -> String {
    let mut reasoning = String::from(template_for(result.primary_emotion));
    reasoning.push_str(confidence_note(result.confidence));

    if !result.secondary_emotions.is_empty() {
        let names: Vec<&str> = result
            .secondary_emotions
            .iter()
            .map(|e| e.as_str())
            .collect();
        reasoning.push_str(&format!(
            " We also detected hints of {}, so some recommendations may reflect these mixed feelings.",
            names.join(", ")
        ));
    }

    reasoning
}

/// Reasoning for bundles built by the last-resort fallback
pub fn fallback_reasoning(emotion: Emotion) -> String {
    format!(
        "We used fallback recommendations based on {} emotion. Results may be more general but should still be relevant.",
        emotion
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use emotion::{KeywordScores, SentimentScores};

    fn result(primary: Emotion, confidence: f64, secondary: Vec<Emotion>) -> EmotionResult {
        EmotionResult {
            primary_emotion: primary,
            confidence,
            secondary_emotions: secondary,
            sentiment_scores: SentimentScores::neutral(),
            polarity: 0.0,
            subjectivity: 0.0,
            keyword_scores: KeywordScores::new(),
            decided_by: "test".to_string(),
        }
    }

    #[test]
    fn test_confidence_boundaries_are_exclusive() {
        assert_eq!(confidence_note(0.81), confidence_note(0.95));
        assert!(confidence_note(0.81).contains("highly"));
        assert!(confidence_note(0.8).contains("moderately"));
        assert!(confidence_note(0.61).contains("moderately"));
        assert!(confidence_note(0.6).contains("best guess"));
        assert!(confidence_note(0.4).contains("best guess"));
    }

    #[test]
    fn test_reasoning_without_secondary() {
        let text = generate_reasoning(&result(Emotion::Calm, 0.4, vec![]));

        assert!(text.starts_with("Perfect time for some peaceful content."));
        assert!(text.ends_with("best guess based on your input."));
        assert!(!text.contains("hints of"));
    }

    #[test]
    fn test_reasoning_names_secondary_emotions_in_order() {
        let text = generate_reasoning(&result(
            Emotion::Joy,
            0.9,
            vec![Emotion::Anticipation, Emotion::Love],
        ));

        assert!(text.contains("highly confident"));
        assert!(text.contains("We also detected hints of anticipation, love, so some"));
    }

    #[test]
    fn test_every_emotion_has_a_template() {
        for emotion in Emotion::ALL {
            assert!(!template_for(emotion).is_empty());
        }
    }

    #[test]
    fn test_fallback_reasoning_mentions_emotion() {
        assert!(fallback_reasoning(Emotion::Stress).starts_with(
            "We used fallback recommendations based on stress emotion."
        ));
    }
}
