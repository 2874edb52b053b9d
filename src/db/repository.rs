//! Feedback repository.
//!
//! Append-only: records are inserted and read, never updated or deleted.

use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{Category, FeedbackRecord, Sentiment};

/// Database repository for feedback records.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert records in one transaction; either all land or none do.
    pub async fn append_feedback(&self, records: &[FeedbackRecord]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for record in records {
            sqlx::query(
                "INSERT INTO feedback (id, text, category, sentiment, confidence_score, created_at) VALUES (?, ?, ?, ?, ?, ?)"
            )
            .bind(&record.id)
            .bind(&record.text)
            .bind(record.category.as_str())
            .bind(record.sentiment.as_str())
            .bind(record.confidence_score)
            .bind(&record.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// All records in insertion order.
    pub async fn list_feedback(&self) -> Result<Vec<FeedbackRecord>, AppError> {
        let rows = sqlx::query(
            "SELECT id, text, category, sentiment, confidence_score, created_at FROM feedback ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(feedback_from_row).collect())
    }

    /// Get a record by ID.
    pub async fn get_feedback(&self, id: &str) -> Result<Option<FeedbackRecord>, AppError> {
        let row = sqlx::query(
            "SELECT id, text, category, sentiment, confidence_score, created_at FROM feedback WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(feedback_from_row))
    }

    /// Number of stored records.
    pub async fn count_feedback(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM feedback")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("total"))
    }

    #[cfg(test)]
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn feedback_from_row(row: &sqlx::sqlite::SqliteRow) -> FeedbackRecord {
    let category: String = row.get("category");
    let sentiment: String = row.get("sentiment");
    FeedbackRecord {
        id: row.get("id"),
        text: row.get("text"),
        category: Category::resolve(Some(&category)),
        sentiment: Sentiment::parse(&sentiment).unwrap_or(Sentiment::Neutral),
        confidence_score: row.get("confidence_score"),
        created_at: row.get("created_at"),
    }
}
