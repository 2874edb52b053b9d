//! Bulk ingestion of tabular feedback uploads.
//!
//! Structural problems (unreadable file, no `text` column) fail the whole
//! upload before anything is written. Row problems never do: rows without text
//! are skipped and unknown categories fall back to `general`.

mod format;

pub use format::UploadFormat;

use crate::analysis::AnalyzedFeedback;
use crate::analytics::AnalyticsEngine;
use crate::errors::AppError;
use crate::models::Category;

/// Rows analyzed and ready to commit, plus the number skipped.
#[derive(Debug, Default)]
pub struct PreparedBatch {
    pub entries: Vec<AnalyzedFeedback>,
    pub skipped: usize,
    /// Rows whose category cell held an unknown value.
    pub categories_defaulted: usize,
}

/// Parse, validate and analyze an upload. Pure with respect to shared state.
pub fn prepare_upload(
    engine: &AnalyticsEngine,
    format: UploadFormat,
    bytes: &[u8],
) -> Result<PreparedBatch, AppError> {
    let table = format.parse(bytes)?;

    let text_col = table.column("text").ok_or_else(|| {
        AppError::Validation("Uploaded file must contain a 'text' column".to_string())
    })?;
    let category_col = table.column("category");

    let mut batch = PreparedBatch::default();
    for (index, row) in table.rows.iter().enumerate() {
        // Header is line 1.
        let line = index + 2;

        let text = row.get(text_col).map(|t| t.trim()).unwrap_or_default();
        if text.is_empty() {
            tracing::debug!(line, "Skipping row without text");
            batch.skipped += 1;
            continue;
        }

        let raw_category = category_col
            .and_then(|col| row.get(col))
            .map(|c| c.trim())
            .filter(|c| !c.is_empty());
        let category = Category::resolve(raw_category);
        if raw_category.is_some_and(|c| Category::parse(c).is_none()) {
            tracing::debug!(line, category = raw_category, "Unknown category, using general");
            batch.categories_defaulted += 1;
        }

        batch.entries.push(engine.analyze(text, category));
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FeedbackAnalyzer;
    use crate::models::Sentiment;

    fn engine() -> AnalyticsEngine {
        AnalyticsEngine::new(FeedbackAnalyzer::new(false), 0)
    }

    #[test]
    fn test_rows_without_text_are_skipped() {
        let csv = "text,category\nThe course was excellent,course\n   ,faculty\nBoring lectures,course\n";
        let batch = prepare_upload(&engine(), UploadFormat::Csv, csv.as_bytes()).unwrap();

        assert_eq!(batch.entries.len(), 2);
        assert_eq!(batch.skipped, 1);
        assert_eq!(batch.entries[0].classification.sentiment, Sentiment::Positive);
        assert_eq!(batch.entries[1].classification.sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_category_is_optional_and_lenient() {
        let csv = "TEXT,Category\nGood lab,FACILITIES\nGood lab,cafeteria\nGood lab,\n";
        let batch = prepare_upload(&engine(), UploadFormat::Csv, csv.as_bytes()).unwrap();
        let categories: Vec<_> = batch.entries.iter().map(|e| e.category).collect();
        assert_eq!(
            categories,
            vec![Category::Facilities, Category::General, Category::General]
        );
        assert_eq!(batch.categories_defaulted, 1);

        let batch = prepare_upload(&engine(), UploadFormat::Csv, b"text\nGood lab\n").unwrap();
        assert_eq!(batch.entries[0].category, Category::General);
    }

    #[test]
    fn test_missing_text_column_fails_the_upload() {
        let err = prepare_upload(&engine(), UploadFormat::Csv, b"comment,category\nhi,course\n")
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = prepare_upload(&engine(), UploadFormat::Csv, b"").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    fn workbook() -> Vec<u8> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Text").unwrap();
        sheet.write_string(0, 1, "category").unwrap();
        sheet.write_string(1, 0, "The course was excellent").unwrap();
        sheet.write_string(1, 1, "Course").unwrap();
        sheet.write_string(3, 0, "Boring and confusing lectures").unwrap();
        sheet.write_number(3, 1, 42).unwrap();
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_spreadsheet_rows() {
        let batch = prepare_upload(&engine(), UploadFormat::Spreadsheet, &workbook()).unwrap();

        assert_eq!(batch.entries.len(), 2);
        assert_eq!(batch.skipped, 1);
        assert_eq!(batch.categories_defaulted, 1);
        let categories: Vec<_> = batch.entries.iter().map(|e| e.category).collect();
        assert_eq!(categories, vec![Category::Course, Category::General]);
        assert_eq!(batch.entries[0].classification.sentiment, Sentiment::Positive);
        assert_eq!(batch.entries[1].classification.sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_text_is_trimmed() {
        let batch =
            prepare_upload(&engine(), UploadFormat::Csv, b"text\n\"  padded text  \"\n").unwrap();
        assert_eq!(batch.entries[0].text, "padded text");
    }
}
