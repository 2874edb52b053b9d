//! Text normalization and tokenization.

use std::collections::{BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

/// Anything that is not a lower-case ASCII letter or whitespace.
static NON_ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z\s]").unwrap());

/// English stopwords excluded from keyword themes.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "ain", "all", "also", "am", "an",
        "and", "any", "are", "aren", "arent", "as", "at", "be", "because", "been", "before",
        "being", "below", "between", "both", "but", "by", "can", "cant", "could", "couldnt",
        "did", "didnt", "do", "does", "doesnt", "doing", "dont", "down", "during", "each",
        "even", "every", "few", "for", "from", "further", "get", "got", "had", "hadnt", "has",
        "hasnt", "have", "havent", "having", "he", "her", "here", "hers", "herself", "him",
        "himself", "his", "how", "however", "i", "if", "im", "in", "into", "is", "isnt", "it",
        "its", "itself", "ive", "just", "let", "lot", "me", "might", "more", "most", "much",
        "must", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "one",
        "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "really",
        "same", "shall", "she", "should", "shouldnt", "so", "some", "such", "than", "that",
        "thats", "the", "their", "theirs", "them", "themselves", "then", "there", "these",
        "they", "this", "those", "through", "to", "too", "under", "until", "up", "us", "very",
        "was", "wasnt", "we", "were", "werent", "what", "when", "where", "which", "while",
        "who", "whom", "why", "will", "with", "without", "wont", "would", "wouldnt", "yet",
        "you", "your", "youre", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Minimum keyword length kept by [`Tokenizer::tokenize`].
pub const DEFAULT_MIN_TOKEN_LEN: usize = 3;

/// Case-folding, punctuation-stripping tokenizer with stopword filtering.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    min_token_len: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
        }
    }

    /// Normalized words in order, without stopword or length filtering.
    ///
    /// Apostrophes vanish along with other punctuation, so "don't" becomes "dont".
    pub fn words(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        NON_ALPHA
            .replace_all(&lowered, "")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// Normalized tokens in order, with stopwords and short words removed.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.words(text)
            .into_iter()
            .filter(|word| self.is_keyword(word))
            .collect()
    }

    /// Distinct keywords of one text.
    pub fn keywords(&self, text: &str) -> BTreeSet<String> {
        self.tokenize(text).into_iter().collect()
    }

    fn is_keyword(&self, word: &str) -> bool {
        word.len() >= self.min_token_len && !STOPWORDS.contains(word)
    }
}
