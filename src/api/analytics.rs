//! Analytics API endpoints.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::ApiResult;
use crate::errors::AppError;
use crate::models::{AnalyticsSnapshot, Category, CategoryAnalytics, ThemesResponse};
use crate::AppState;

/// GET /api/analytics - Sentiment totals and percentages.
pub async fn get_analytics(State(state): State<AppState>) -> Json<AnalyticsSnapshot> {
    Json(state.engine.snapshot().await)
}

/// Query parameters for the theme list.
#[derive(Debug, Deserialize)]
pub struct ThemesQuery {
    /// Maximum number of themes; capped by the configured top-N.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// GET /api/themes - Most frequent keywords with their dominant sentiment.
pub async fn get_themes(
    State(state): State<AppState>,
    query: Result<Query<ThemesQuery>, QueryRejection>,
) -> ApiResult<ThemesResponse> {
    let Query(params) = query?;
    let max = state.config.top_themes;
    let limit = params.limit.unwrap_or(max).min(max);

    let themes = state.engine.top_themes(limit).await;
    Ok(Json(ThemesResponse { themes }))
}

/// GET /api/feedback/category/{category} - Sentiment totals for one category.
pub async fn get_category_analytics(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<CategoryAnalytics> {
    let category = Category::parse(&category)
        .ok_or_else(|| AppError::Validation(format!("Unknown category: {}", category)))?;

    Ok(Json(state.engine.category_snapshot(category).await))
}
