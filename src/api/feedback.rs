//! Feedback API endpoints.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, Path, State},
    Json,
};

use super::ApiResult;
use crate::errors::AppError;
use crate::ingest::{prepare_upload, UploadFormat};
use crate::models::{BulkUploadSummary, Category, FeedbackRecord, SubmitFeedbackRequest};
use crate::AppState;

/// Multipart field the dashboard sends the file in.
const UPLOAD_FIELD: &str = "file";

/// POST /api/feedback - Classify and store one feedback entry.
pub async fn submit_feedback(
    State(state): State<AppState>,
    payload: Result<Json<SubmitFeedbackRequest>, JsonRejection>,
) -> ApiResult<FeedbackRecord> {
    let Json(request) = payload?;

    let text = request.text.as_deref().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(AppError::Validation("Feedback text is required".to_string()));
    }
    let category = Category::resolve(request.category.as_deref());

    let analyzed = state.engine.analyze(text, category);
    tracing::debug!(
        sentiment = analyzed.classification.sentiment.as_str(),
        score = analyzed.classification.score,
        "Classified feedback"
    );

    state
        .engine
        .commit(&state.repo, vec![analyzed])
        .await?
        .pop()
        .map(Json)
        .ok_or_else(|| AppError::Internal("Commit returned no record".to_string()))
}

/// GET /api/feedback/{id} - Fetch one stored entry.
pub async fn get_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<FeedbackRecord> {
    state
        .repo
        .get_feedback(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Feedback {} not found", id)))
}

/// An uploaded file pulled out of the multipart body.
struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) && field.file_name().is_none() {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        return Ok(Upload {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(AppError::Validation(format!(
        "No file uploaded; send it in the '{}' field",
        UPLOAD_FIELD
    )))
}

/// POST /api/feedback/bulk - Ingest a CSV or spreadsheet of feedback rows.
pub async fn upload_bulk_feedback(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<BulkUploadSummary> {
    let mut multipart = multipart?;
    let upload = read_upload(&mut multipart).await?;
    let format = UploadFormat::detect(upload.file_name.as_deref(), upload.content_type.as_deref())?;

    // Parsing and classification are CPU-bound and need no lock.
    let engine = state.engine.clone();
    let batch =
        tokio::task::spawn_blocking(move || prepare_upload(&engine, format, &upload.bytes))
            .await??;

    let processed = batch.entries.len();
    state.engine.commit(&state.repo, batch.entries).await?;

    tracing::info!(
        processed,
        skipped = batch.skipped,
        categories_defaulted = batch.categories_defaulted,
        "Bulk upload ingested"
    );

    Ok(Json(BulkUploadSummary::new(processed, batch.skipped)))
}
