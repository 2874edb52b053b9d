//! Analytics views derived from the stored feedback.

use serde::{Deserialize, Serialize};

use super::{Category, Sentiment};

/// Point-in-time sentiment totals with percentages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsSnapshot {
    pub total_feedback: u64,
    pub positive_count: u64,
    pub negative_count: u64,
    pub neutral_count: u64,
    pub positive_percentage: f64,
    pub negative_percentage: f64,
    pub neutral_percentage: f64,
}

/// Snapshot restricted to one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryAnalytics {
    pub category: Category,
    #[serde(flatten)]
    pub snapshot: AnalyticsSnapshot,
}

/// A recurring keyword with its dominant sentiment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThemeKeyword {
    pub keyword: String,
    pub frequency: u64,
    pub sentiment: Sentiment,
}

/// Response body for `GET /api/themes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemesResponse {
    pub themes: Vec<ThemeKeyword>,
}
