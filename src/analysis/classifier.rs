//! Lexicon-based sentiment classifier.

use super::lexicon::SentimentLexicon;
use super::tokenizer::Tokenizer;
use crate::models::Sentiment;

/// Scores above this are positive.
const POSITIVE_THRESHOLD: f64 = 0.1;
/// Scores below this are negative.
const NEGATIVE_THRESHOLD: f64 = -0.1;
/// How many following words a negation applies to.
const NEGATION_WINDOW: usize = 3;
/// Negated weights are flipped and dampened by this factor.
const NEGATION_DAMPING: f64 = 0.8;

/// Outcome of classifying one text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub sentiment: Sentiment,
    /// Mean polarity of the scored words, in [-1.0, 1.0].
    pub score: f64,
    pub confidence: f64,
}

/// Deterministic, total sentiment classifier.
#[derive(Debug, Clone, Default)]
pub struct SentimentClassifier {
    tokenizer: Tokenizer,
    lexicon: SentimentLexicon,
}

impl SentimentClassifier {
    pub fn new(tokenizer: Tokenizer, lexicon: SentimentLexicon) -> Self {
        Self { tokenizer, lexicon }
    }

    /// Sentiment label only.
    pub fn classify(&self, text: &str) -> Sentiment {
        self.analyze(text).sentiment
    }

    /// Full classification with score and confidence.
    pub fn analyze(&self, text: &str) -> Classification {
        let words = self.tokenizer.words(text);

        let mut total = 0.0;
        let mut scored = 0usize;
        let mut modifier = 1.0;
        let mut negation_left = 0usize;

        for word in &words {
            if self.lexicon.is_negation(word) {
                negation_left = NEGATION_WINDOW;
                continue;
            }

            if let Some(m) = self.lexicon.modifier(word) {
                modifier = m;
                continue;
            }

            if let Some(weight) = self.lexicon.score(word) {
                let mut value = weight * modifier;
                if negation_left > 0 {
                    value = -value * NEGATION_DAMPING;
                }
                total += value;
                scored += 1;
                modifier = 1.0;
            }

            negation_left = negation_left.saturating_sub(1);
        }

        let score = if scored > 0 {
            (total / scored as f64).clamp(-1.0, 1.0)
        } else {
            0.0
        };

        Classification {
            sentiment: bucket(score),
            score,
            confidence: confidence(score),
        }
    }
}

fn bucket(score: f64) -> Sentiment {
    if score > POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if score < NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

fn confidence(score: f64) -> f64 {
    let magnitude = score.abs();
    let confidence = if magnitude > 0.3 { magnitude } else { 0.6 };
    confidence.min(1.0)
}
