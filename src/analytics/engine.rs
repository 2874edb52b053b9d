//! Guarded owner of all derived analytics state.
//!
//! Every write goes through [`AnalyticsEngine::commit`], which holds the state
//! lock across the store append and the in-memory updates. The in-memory side
//! is only touched after the store transaction has committed, so a failed
//! append leaves counters and keyword tables unchanged. The append and the
//! update run on their own task, so dropping the caller cannot split them.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use super::aggregator::{SentimentAggregator, SentimentCounts};
use super::themes::ThemeExtractor;
use crate::analysis::{AnalyzedFeedback, FeedbackAnalyzer};
use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{
    AnalyticsSnapshot, Category, CategoryAnalytics, FeedbackRecord, Sentiment, ThemeKeyword,
};

#[derive(Debug, Default, PartialEq, Eq)]
struct AnalyticsState {
    aggregator: SentimentAggregator,
    themes: ThemeExtractor,
    categories: BTreeMap<Category, SentimentCounts>,
}

impl AnalyticsState {
    fn apply(&mut self, category: Category, sentiment: Sentiment, keywords: &BTreeSet<String>) {
        self.aggregator.record(sentiment);
        self.themes.record(keywords, sentiment);
        self.categories.entry(category).or_default().record(sentiment);
    }
}

/// Analyzer plus the single mutable copy of the aggregates.
pub struct AnalyticsEngine {
    analyzer: FeedbackAnalyzer,
    percent_precision: u32,
    state: Mutex<AnalyticsState>,
}

impl AnalyticsEngine {
    pub fn new(analyzer: FeedbackAnalyzer, percent_precision: u32) -> Self {
        Self {
            analyzer,
            percent_precision,
            state: Mutex::new(AnalyticsState::default()),
        }
    }

    /// Classify and tokenize without touching shared state.
    pub fn analyze(&self, text: &str, category: Category) -> AnalyzedFeedback {
        self.analyzer.analyze(text, category)
    }

    /// Recompute every aggregate from stored records.
    fn recompute(&self, records: &[FeedbackRecord]) -> AnalyticsState {
        let mut state = AnalyticsState::default();
        for record in records {
            let keywords = self.analyzer.keywords(&record.text);
            state.apply(record.category, record.sentiment, &keywords);
        }
        state
    }

    /// Stored records whose label differs from what the current lexicon gives.
    /// Stored labels stay authoritative.
    fn count_relabeled(&self, records: &[FeedbackRecord]) -> usize {
        records
            .iter()
            .filter(|record| self.analyzer.classify(&record.text) != record.sentiment)
            .count()
    }

    /// Replace the in-memory aggregates with a full recomputation.
    pub async fn rebuild(&self, records: &[FeedbackRecord]) {
        let rebuilt = self.recompute(records);
        let relabeled = self.count_relabeled(records);
        let mut state = self.state.lock().await;
        *state = rebuilt;
        tracing::info!(
            records = records.len(),
            keywords = state.themes.keyword_count(),
            "Analytics rebuilt from store"
        );
        if relabeled > 0 {
            tracing::warn!(relabeled, "Stored sentiments differ from the current lexicon");
        }
    }

    /// Persist analyzed feedback and fold it into the aggregates as one unit.
    ///
    /// The work is spawned, so it runs to completion even if the returned
    /// future is dropped.
    pub async fn commit(
        self: &Arc<Self>,
        repo: &Arc<Repository>,
        batch: Vec<AnalyzedFeedback>,
    ) -> Result<Vec<FeedbackRecord>, AppError> {
        let engine = Arc::clone(self);
        let repo = Arc::clone(repo);
        tokio::spawn(async move { engine.append_and_apply(&repo, batch).await }).await?
    }

    async fn append_and_apply(
        &self,
        repo: &Repository,
        batch: Vec<AnalyzedFeedback>,
    ) -> Result<Vec<FeedbackRecord>, AppError> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let created_at = Utc::now().to_rfc3339();
        let records: Vec<FeedbackRecord> = batch
            .iter()
            .map(|entry| FeedbackRecord {
                id: uuid::Uuid::new_v4().to_string(),
                text: entry.text.clone(),
                category: entry.category,
                sentiment: entry.classification.sentiment,
                confidence_score: entry.classification.confidence,
                created_at: created_at.clone(),
            })
            .collect();

        let mut state = self.state.lock().await;
        repo.append_feedback(&records).await?;

        for entry in &batch {
            state.apply(entry.category, entry.classification.sentiment, &entry.keywords);
        }
        tracing::debug!(count = records.len(), "Committed feedback");

        Ok(records)
    }

    pub async fn snapshot(&self) -> AnalyticsSnapshot {
        let state = self.state.lock().await;
        state.aggregator.snapshot(self.percent_precision)
    }

    pub async fn total(&self) -> u64 {
        self.state.lock().await.aggregator.counts().total()
    }

    pub async fn top_themes(&self, n: usize) -> Vec<ThemeKeyword> {
        self.state.lock().await.themes.top_themes(n)
    }

    pub async fn category_snapshot(&self, category: Category) -> CategoryAnalytics {
        let state = self.state.lock().await;
        let counts = state.categories.get(&category).copied().unwrap_or_default();
        CategoryAnalytics {
            category,
            snapshot: counts.snapshot(self.percent_precision),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::db::init_database;
    use tempfile::TempDir;

    async fn setup() -> (TempDir, Arc<Repository>, Arc<AnalyticsEngine>) {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("test.sqlite")).await.unwrap();
        let engine = AnalyticsEngine::new(FeedbackAnalyzer::new(false), 0);
        (temp_dir, Arc::new(Repository::new(pool)), Arc::new(engine))
    }

    const SAMPLES: [(&str, Category); 6] = [
        ("The course was excellent and engaging", Category::Course),
        ("The professor was helpful and inspiring", Category::Faculty),
        ("The professor was rude and the lectures were boring", Category::Faculty),
        ("Library hours are fine", Category::Facilities),
        ("The workshop was great, the professor was great", Category::Events),
        ("Terrible wifi in the library", Category::Facilities),
    ];

    #[tokio::test]
    async fn test_incremental_state_matches_rebuild() {
        let (_dir, repo, engine) = setup().await;

        for (text, category) in SAMPLES {
            let analyzed = engine.analyze(text, category);
            engine.commit(&repo, vec![analyzed]).await.unwrap();
        }

        let records = repo.list_feedback().await.unwrap();
        assert_eq!(records.len(), SAMPLES.len());

        let recomputed = engine.recompute(&records);
        assert_eq!(*engine.state.lock().await, recomputed);

        let before = engine.top_themes(50).await;
        engine.rebuild(&records).await;
        assert_eq!(engine.top_themes(50).await, before);
    }

    #[tokio::test]
    async fn test_theme_frequency_counts_distinct_entries() {
        let (_dir, repo, engine) = setup().await;

        let batch = SAMPLES
            .iter()
            .map(|(text, category)| engine.analyze(text, *category))
            .collect();
        let records = engine.commit(&repo, batch).await.unwrap();

        let analyzer = FeedbackAnalyzer::new(false);
        for theme in engine.top_themes(100).await {
            let containing = records
                .iter()
                .filter(|r| analyzer.keywords(&r.text).contains(&theme.keyword))
                .count() as u64;
            assert_eq!(theme.frequency, containing, "{}", theme.keyword);
        }

        // "great" appears twice in one entry but counts once.
        let themes = engine.top_themes(100).await;
        let great = themes.iter().find(|t| t.keyword == "great").unwrap();
        assert_eq!(great.frequency, 1);
    }

    #[tokio::test]
    async fn test_failed_append_leaves_state_untouched() {
        let (_dir, repo, engine) = setup().await;
        let analyzed = engine.analyze("The course was excellent", Category::Course);
        engine.commit(&repo, vec![analyzed.clone()]).await.unwrap();
        let before = engine.snapshot().await;

        repo.close().await;
        let err = engine.commit(&repo, vec![analyzed]).await.unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(engine.snapshot().await, before);
        assert_eq!(engine.total().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_commits_lose_no_updates() {
        let (_dir, repo, engine) = setup().await;

        let mut handles = Vec::new();
        for i in 0..40 {
            let repo = repo.clone();
            let engine = engine.clone();
            handles.push(tokio::spawn(async move {
                let (text, category) = SAMPLES[i % SAMPLES.len()];
                let analyzed = engine.analyze(text, category);
                engine.commit(&repo, vec![analyzed]).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let snapshot = engine.snapshot().await;
        assert_eq!(snapshot.total_feedback, 40);
        assert_eq!(
            snapshot.positive_count + snapshot.negative_count + snapshot.neutral_count,
            40
        );
        assert_eq!(repo.count_feedback().await.unwrap(), 40);

        let records = repo.list_feedback().await.unwrap();
        assert_eq!(*engine.state.lock().await, engine.recompute(&records));
    }

    #[tokio::test]
    async fn test_category_snapshot() {
        let (_dir, repo, engine) = setup().await;
        let batch = SAMPLES
            .iter()
            .map(|(text, category)| engine.analyze(text, *category))
            .collect();
        engine.commit(&repo, batch).await.unwrap();

        let faculty = engine.category_snapshot(Category::Faculty).await;
        assert_eq!(faculty.snapshot.total_feedback, 2);
        assert_eq!(faculty.snapshot.positive_count, 1);
        assert_eq!(faculty.snapshot.negative_count, 1);
        assert_eq!(faculty.snapshot.positive_percentage, 50.0);

        let general = engine.category_snapshot(Category::General).await;
        assert_eq!(general.snapshot.total_feedback, 0);
        assert_eq!(general.snapshot.neutral_percentage, 0.0);
    }

    #[tokio::test]
    async fn test_dropped_commits_keep_store_and_state_in_step() {
        let (_dir, repo, engine) = setup().await;

        let mut handles = Vec::new();
        for i in 0..200u64 {
            let repo = repo.clone();
            let engine = engine.clone();
            handles.push(tokio::spawn(async move {
                let (text, category) = SAMPLES[i as usize % SAMPLES.len()];
                let analyzed = engine.analyze(text, category);
                let budget = Duration::from_micros(10 + (i % 100) * 10);
                let _ = tokio::time::timeout(budget, engine.commit(&repo, vec![analyzed])).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Appends only happen under the state lock, so holding it freezes both sides.
        let state = engine.state.lock().await;
        let records = repo.list_feedback().await.unwrap();
        assert_eq!(state.aggregator.counts().total(), records.len() as u64);
        assert_eq!(*state, engine.recompute(&records));
    }

    #[tokio::test]
    async fn test_relabeled_records_are_counted_not_rewritten() {
        let (_dir, repo, engine) = setup().await;
        let analyzed = engine.analyze("The course was excellent", Category::Course);
        let mut records = engine.commit(&repo, vec![analyzed]).await.unwrap();
        assert_eq!(engine.count_relabeled(&records), 0);

        records[0].sentiment = Sentiment::Negative;
        assert_eq!(engine.count_relabeled(&records), 1);

        engine.rebuild(&records).await;
        assert_eq!(engine.snapshot().await.negative_count, 1);
    }
}
