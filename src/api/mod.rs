//! REST API module.
//!
//! Handlers return the dashboard's JSON shapes directly; failures use the
//! `AppError` envelope.

mod analytics;
mod feedback;

pub use analytics::*;
pub use feedback::*;

use axum::Json;

use crate::errors::AppError;

/// Response type for handlers that can fail.
pub type ApiResult<T> = Result<Json<T>, AppError>;
