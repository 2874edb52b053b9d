//! Configuration module for the feedback backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Most decimal places a snapshot percentage may carry.
pub const MAX_PERCENT_PRECISION: u32 = 6;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// Maximum number of themes returned by `/api/themes`
    pub top_themes: usize,
    /// Decimal places kept in snapshot percentages
    pub percent_precision: u32,
    /// Infer a category from the text when feedback arrives as `general`
    pub auto_categorize: bool,
    /// Upper bound on request bodies, bulk uploads included
    pub max_upload_bytes: usize,
}

/// A configuration variable held a value that could not be parsed.
#[derive(Debug)]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid value {:?} for {}", self.value, self.var)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("FEEDBACK_DB_PATH")
            .unwrap_or_else(|_| "./data/feedback.sqlite".to_string())
            .into();

        let log_level = env::var("FEEDBACK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            db_path,
            bind_addr: parse_var("FEEDBACK_BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 8000)))?,
            log_level,
            log_json: parse_bool("FEEDBACK_LOG_JSON", false)?,
            top_themes: parse_var("FEEDBACK_TOP_THEMES", 20)?,
            percent_precision: parse_bounded(
                "FEEDBACK_PERCENT_PRECISION",
                0,
                MAX_PERCENT_PRECISION,
            )?,
            auto_categorize: parse_bool("FEEDBACK_AUTO_CATEGORIZE", false)?,
            max_upload_bytes: parse_var("FEEDBACK_MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError { var, value }),
        Err(_) => Ok(default),
    }
}

fn parse_bounded(var: &'static str, default: u32, max: u32) -> Result<u32, ConfigError> {
    let value = parse_var(var, default)?;
    if value > max {
        return Err(ConfigError {
            var,
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn parse_bool(var: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(var) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError { var, value }),
        },
        Err(_) => Ok(default),
    }
}
