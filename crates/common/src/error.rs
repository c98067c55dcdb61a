//! Unified error type for TTime.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Weather API error: {0}")]
    Weather(String),

    #[error("News API error: {0}")]
    News(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Market data error: {0}")]
    Market(String),

    #[error("Rate limited: {domain} request budget exhausted")]
    RateLimited { domain: &'static str },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
