//! Shared types, config, settings, and error definitions for TTime.

pub mod config;
pub mod error;
pub mod fetch;
pub mod rate_limit;
pub mod settings;
pub mod types;

pub use config::AppConfig;
pub use error::Error;
pub use fetch::{MarketFetcher, NewsFetcher, WeatherFetcher};
pub use settings::Settings;
pub use types::*;

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
