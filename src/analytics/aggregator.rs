//! Sentiment counters and the snapshot derived from them.

use crate::config::MAX_PERCENT_PRECISION;
use crate::models::{AnalyticsSnapshot, Sentiment};

/// Per-sentiment counters. The total is always derived, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentCounts {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
}

impl SentimentCounts {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> u64 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> u64 {
        self.positive + self.negative + self.neutral
    }

    /// The sentiment with the most votes; `Neutral` when the top count is shared
    /// or there are no votes at all.
    pub fn dominant(&self) -> Sentiment {
        let top = self.positive.max(self.negative).max(self.neutral);
        let mut leaders = Sentiment::ALL.into_iter().filter(|s| self.get(*s) == top);

        match (leaders.next(), leaders.next()) {
            (Some(only), None) => only,
            _ => Sentiment::Neutral,
        }
    }

    /// Snapshot with percentages rounded to `precision` decimals.
    pub fn snapshot(&self, precision: u32) -> AnalyticsSnapshot {
        let total = self.total();
        AnalyticsSnapshot {
            total_feedback: total,
            positive_count: self.positive,
            negative_count: self.negative,
            neutral_count: self.neutral,
            positive_percentage: percentage(self.positive, total, precision),
            negative_percentage: percentage(self.negative, total, precision),
            neutral_percentage: percentage(self.neutral, total, precision),
        }
    }
}

fn percentage(count: u64, total: u64, precision: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let factor = 10f64.powi(precision.min(MAX_PERCENT_PRECISION) as i32);
    (count as f64 / total as f64 * 100.0 * factor).round() / factor
}

/// Running sentiment totals over every stored feedback entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentAggregator {
    counts: SentimentCounts,
}

impl SentimentAggregator {
    pub fn record(&mut self, sentiment: Sentiment) {
        self.counts.record(sentiment);
    }

    pub fn counts(&self) -> SentimentCounts {
        self.counts
    }

    pub fn snapshot(&self, precision: u32) -> AnalyticsSnapshot {
        self.counts.snapshot(precision)
    }
}
