//! Data models for the feedback analytics backend.
//!
//! Field names follow the dashboard's JSON contract exactly (snake_case).

mod analytics;
mod feedback;

pub use analytics::*;
pub use feedback::*;
