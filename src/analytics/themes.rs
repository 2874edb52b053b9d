//! Keyword theme extraction.
//!
//! Frequency counts feedback entries containing a keyword, not raw term
//! occurrences: callers pass the distinct keyword set of each entry.

use std::collections::{BTreeSet, HashMap};

use super::aggregator::SentimentCounts;
use crate::models::{Sentiment, ThemeKeyword};

/// Frequency and sentiment votes for one keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct KeywordStats {
    frequency: u64,
    votes: SentimentCounts,
}

/// Keyword → (frequency, votes) table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeExtractor {
    keywords: HashMap<String, KeywordStats>,
}

impl ThemeExtractor {
    /// Count one feedback entry's distinct keywords.
    pub fn record(&mut self, keywords: &BTreeSet<String>, sentiment: Sentiment) {
        for keyword in keywords {
            let stats = self.keywords.entry(keyword.clone()).or_default();
            stats.frequency += 1;
            stats.votes.record(sentiment);
        }
    }

    /// Up to `n` themes, most frequent first, ties in keyword order.
    pub fn top_themes(&self, n: usize) -> Vec<ThemeKeyword> {
        let mut ranked: Vec<(&String, &KeywordStats)> = self.keywords.iter().collect();
        ranked.sort_by(|(ka, a), (kb, b)| b.frequency.cmp(&a.frequency).then_with(|| ka.cmp(kb)));

        ranked
            .into_iter()
            .take(n)
            .map(|(keyword, stats)| ThemeKeyword {
                keyword: keyword.clone(),
                frequency: stats.frequency,
                sentiment: stats.votes.dominant(),
            })
            .collect()
    }

    /// Number of distinct keywords tracked.
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}
