//! Feedback model matching the dashboard's feedback contract.

use serde::{Deserialize, Serialize};

/// Sentiment label assigned to one feedback text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "negative" => Some(Sentiment::Negative),
            "neutral" => Some(Sentiment::Neutral),
            _ => None,
        }
    }
}

/// Feedback category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    General,
    Course,
    Faculty,
    Facilities,
    Events,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Course => "course",
            Category::Faculty => "faculty",
            Category::Facilities => "facilities",
            Category::Events => "events",
        }
    }

    /// Strict parse; `None` for anything outside the known set.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Some(Category::General),
            "course" => Some(Category::Course),
            "faculty" => Some(Category::Faculty),
            "facilities" => Some(Category::Facilities),
            "events" => Some(Category::Events),
            _ => None,
        }
    }

    /// Lenient parse used for submissions: missing or unknown values become `General`.
    pub fn resolve(s: Option<&str>) -> Self {
        s.and_then(Self::parse).unwrap_or_default()
    }
}

/// A stored feedback entry. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackRecord {
    pub id: String,
    pub text: String,
    pub category: Category,
    pub sentiment: Sentiment,
    pub confidence_score: f64,
    pub created_at: String,
}

/// Request body for submitting a single feedback entry.
///
/// Both fields are optional at the wire level so that a missing `text`
/// surfaces as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitFeedbackRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Result of a bulk upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BulkUploadSummary {
    pub message: String,
    pub processed: usize,
    pub skipped: usize,
}

impl BulkUploadSummary {
    pub fn new(processed: usize, skipped: usize) -> Self {
        Self {
            message: format!(
                "Successfully processed {} feedback entries ({} skipped)",
                processed, skipped
            ),
            processed,
            skipped,
        }
    }
}
