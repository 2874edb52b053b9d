//! Student Feedback Sentiment Backend
//!
//! A REST backend that classifies feedback sentiment, tracks keyword themes,
//! and ingests bulk CSV/spreadsheet uploads, with SQLite persistence.

mod analysis;
mod analytics;
mod api;
mod config;
mod db;
mod errors;
mod ingest;
mod models;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use analysis::FeedbackAnalyzer;
use analytics::AnalyticsEngine;
use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub engine: Arc<AnalyticsEngine>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(config.log_json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!config.log_json).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!("Starting Feedback Sentiment Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Rebuild analytics from the stored feedback
    let engine = Arc::new(AnalyticsEngine::new(
        FeedbackAnalyzer::new(config.auto_categorize),
        config.percent_precision,
    ));
    let records = repo.list_feedback().await?;
    engine.rebuild(&records).await;

    let stored = repo.count_feedback().await?;
    if stored as u64 != engine.total().await {
        tracing::warn!(stored, "Feedback count changed while rebuilding analytics");
    }

    // Create application state
    let state = AppState {
        repo,
        engine,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    // API routes
    let api_routes = Router::new()
        // Feedback
        .route("/feedback", post(api::submit_feedback))
        .route("/feedback/bulk", post(api::upload_bulk_feedback))
        .route("/feedback/{id}", get(api::get_feedback))
        .route(
            "/feedback/category/{category}",
            get(api::get_category_analytics),
        )
        // Analytics
        .route("/analytics", get(api::get_analytics))
        .route("/themes", get(api::get_themes));

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
