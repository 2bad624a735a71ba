//! The DecisionTable evaluates rules in priority order.
//!
//! The table is inspectable: rules are named, ordered, and each one can be
//! tested on its own.

use crate::rules::{NeutralBandRule, StrongLexicalRule, StrongNegativeRule, StrongPositiveRule};
use crate::traits::{Evidence, Rule};
use crate::types::Emotion;

/// Outcome of running the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub emotion: Emotion,
    /// Name of the rule that fired, or `"default"`
    pub rule: String,
}

/// Ordered list of rules; the first rule that commits wins.
///
/// ## Usage
/// ```ignore
/// let table = DecisionTable::new()
///     .add_rule(StrongLexicalRule::new(2))
///     .add_rule(StrongPositiveRule::new(0.5))
///     .add_rule(StrongNegativeRule::new(-0.5))
///     .add_rule(NeutralBandRule::new(Emotion::Calm));
///
/// let decision = table.decide(&evidence);
/// ```
pub struct DecisionTable {
    rules: Vec<Box<dyn Rule>>,
    fallback: Emotion,
}

impl DecisionTable {
    /// Create an empty table that always answers `calm`
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            fallback: Emotion::Calm,
        }
    }

    /// The built-in priority order:
    /// strong lexical → strong positive → strong negative → neutral band
    pub fn standard() -> Self {
        Self::new()
            .add_rule(StrongLexicalRule::default())
            .add_rule(StrongPositiveRule::default())
            .add_rule(StrongNegativeRule::default())
            .add_rule(NeutralBandRule::default())
    }

    /// Append a rule (builder pattern)
    pub fn add_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Emotion returned when no rule commits (default: calm)
    pub fn with_fallback(mut self, fallback: Emotion) -> Self {
        self.fallback = fallback;
        self
    }

    /// Rule names in evaluation order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Run the rules in order and return the first commitment
    pub fn decide(&self, evidence: &Evidence<'_>) -> Decision {
        for rule in &self.rules {
            if let Some(emotion) = rule.decide(evidence) {
                tracing::debug!("Rule {} chose {}", rule.name(), emotion);
                return Decision {
                    emotion,
                    rule: rule.name().to_string(),
                };
            }
            tracing::trace!("Rule {} passed", rule.name());
        }

        Decision {
            emotion: self.fallback,
            rule: "default".to_string(),
        }
    }
}

impl Default for DecisionTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{KeywordScores, SentimentScores};

    struct Always(Emotion);

    impl Rule for Always {
        fn name(&self) -> &str {
            "always"
        }

        fn decide(&self, _evidence: &Evidence<'_>) -> Option<Emotion> {
            Some(self.0)
        }
    }

    struct Never;

    impl Rule for Never {
        fn name(&self) -> &str {
            "never"
        }

        fn decide(&self, _evidence: &Evidence<'_>) -> Option<Emotion> {
            None
        }
    }

    fn neutral_evidence<'a>(keywords: &'a KeywordScores, sentiment: &'a SentimentScores) -> Evidence<'a> {
        Evidence {
            keywords,
            sentiment,
            polarity: 0.0,
            subjectivity: 0.0,
        }
    }

    #[test]
    fn test_empty_table_uses_fallback() {
        let keywords = KeywordScores::new();
        let sentiment = SentimentScores::neutral();
        let table = DecisionTable::new().with_fallback(Emotion::Stress);

        let decision = table.decide(&neutral_evidence(&keywords, &sentiment));
        assert_eq!(decision.emotion, Emotion::Stress);
        assert_eq!(decision.rule, "default");
    }

    #[test]
    fn test_first_committing_rule_wins() {
        let keywords = KeywordScores::new();
        let sentiment = SentimentScores::neutral();
        let table = DecisionTable::new()
            .add_rule(Never)
            .add_rule(Always(Emotion::Fear))
            .add_rule(Always(Emotion::Joy));

        let decision = table.decide(&neutral_evidence(&keywords, &sentiment));
        assert_eq!(decision.emotion, Emotion::Fear);
        assert_eq!(decision.rule, "always");
    }

    #[test]
    fn test_standard_table_order() {
        let table = DecisionTable::standard();
        assert_eq!(
            table.rule_names(),
            vec!["strong-lexical", "strong-positive", "strong-negative", "neutral-band"]
        );
    }
}
