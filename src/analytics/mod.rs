//! Derived analytics: sentiment aggregates and keyword themes.

mod aggregator;
mod engine;
mod themes;

pub use engine::AnalyticsEngine;
