//! Polarity lexicon for student feedback.
//!
//! Weights are in [-1.0, 1.0]. Entries are normalized the same way the
//! tokenizer normalizes text (lower-case, no punctuation).

use std::collections::{HashMap, HashSet};

const STRONG_POSITIVE: &[(&str, f64)] = &[
    ("excellent", 0.8),
    ("outstanding", 0.9),
    ("amazing", 0.8),
    ("fantastic", 0.8),
    ("wonderful", 0.8),
    ("brilliant", 0.8),
    ("superb", 0.85),
    ("exceptional", 0.85),
    ("awesome", 0.75),
    ("perfect", 0.85),
    ("love", 0.7),
    ("loved", 0.7),
    ("best", 0.8),
    ("inspiring", 0.75),
    ("great", 0.7),
];

const MODERATE_POSITIVE: &[(&str, f64)] = &[
    ("good", 0.5),
    ("nice", 0.45),
    ("engaging", 0.6),
    ("interesting", 0.5),
    ("helpful", 0.6),
    ("useful", 0.5),
    ("clear", 0.45),
    ("informative", 0.5),
    ("knowledgeable", 0.55),
    ("supportive", 0.55),
    ("friendly", 0.5),
    ("enjoyed", 0.6),
    ("enjoy", 0.5),
    ("like", 0.35),
    ("liked", 0.4),
    ("happy", 0.55),
    ("organized", 0.45),
    ("wellorganized", 0.55),
    ("clean", 0.4),
    ("comfortable", 0.45),
    ("approachable", 0.5),
    ("patient", 0.45),
    ("valuable", 0.55),
    ("effective", 0.5),
    ("fun", 0.5),
    ("improved", 0.4),
    ("satisfied", 0.5),
    ("recommend", 0.5),
    ("modern", 0.35),
    ("fair", 0.3),
];

const STRONG_NEGATIVE: &[(&str, f64)] = &[
    ("terrible", -0.9),
    ("awful", -0.9),
    ("horrible", -0.9),
    ("worst", -0.9),
    ("useless", -0.8),
    ("hate", -0.8),
    ("hated", -0.8),
    ("disgusting", -0.9),
    ("pathetic", -0.85),
    ("unacceptable", -0.8),
    ("disappointing", -0.7),
    ("disappointed", -0.7),
    ("rude", -0.75),
    ("broken", -0.7),
];

const MODERATE_NEGATIVE: &[(&str, f64)] = &[
    ("bad", -0.6),
    ("poor", -0.6),
    ("boring", -0.6),
    ("confusing", -0.55),
    ("confused", -0.45),
    ("unclear", -0.5),
    ("difficult", -0.35),
    ("hard", -0.25),
    ("slow", -0.4),
    ("late", -0.35),
    ("dirty", -0.6),
    ("crowded", -0.4),
    ("noisy", -0.45),
    ("outdated", -0.5),
    ("unhelpful", -0.6),
    ("unfair", -0.6),
    ("disorganized", -0.55),
    ("lacking", -0.45),
    ("lack", -0.4),
    ("problem", -0.4),
    ("problems", -0.4),
    ("issue", -0.35),
    ("issues", -0.35),
    ("waste", -0.6),
    ("stressful", -0.5),
    ("overwhelming", -0.45),
    ("uncomfortable", -0.5),
    ("expensive", -0.35),
    ("cancelled", -0.4),
    ("missing", -0.35),
];

/// Words that scale the next scored word.
const MODIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("highly", 1.3),
    ("super", 1.3),
    ("so", 1.2),
    ("quite", 1.1),
    ("somewhat", 0.7),
    ("slightly", 0.6),
    ("bit", 0.7),
    ("little", 0.7),
];

/// Words that invert the polarity of what follows.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "neither", "nor", "hardly", "barely", "dont",
    "didnt", "doesnt", "isnt", "wasnt", "werent", "arent", "cant", "couldnt", "wont",
    "wouldnt", "shouldnt", "havent", "hasnt", "hadnt", "without",
];

/// Lookup tables used by the sentiment classifier.
#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    scores: HashMap<&'static str, f64>,
    modifiers: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentLexicon {
    /// Build the lexicon with the built-in word lists.
    pub fn new() -> Self {
        let scores = STRONG_POSITIVE
            .iter()
            .chain(MODERATE_POSITIVE)
            .chain(STRONG_NEGATIVE)
            .chain(MODERATE_NEGATIVE)
            .copied()
            .collect();

        Self {
            scores,
            modifiers: MODIFIERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
        }
    }

    pub fn score(&self, word: &str) -> Option<f64> {
        self.scores.get(word).copied()
    }

    pub fn modifier(&self, word: &str) -> Option<f64> {
        self.modifiers.get(word).copied()
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_are_bounded() {
        let lexicon = SentimentLexicon::new();
        for (word, weight) in lexicon.scores.iter() {
            assert!((-1.0..=1.0).contains(weight), "{} out of range", word);
        }
    }

    #[test]
    fn test_lookup_kinds_do_not_overlap() {
        let lexicon = SentimentLexicon::new();
        for word in NEGATIONS {
            assert!(lexicon.score(word).is_none());
            assert!(lexicon.modifier(word).is_none());
        }
        for (word, _) in MODIFIERS {
            assert!(lexicon.score(word).is_none());
        }
        assert!(lexicon.is_negation("didnt"));
        assert_eq!(lexicon.score("excellent"), Some(0.8));
        assert_eq!(lexicon.modifier("very"), Some(1.3));
    }
}
