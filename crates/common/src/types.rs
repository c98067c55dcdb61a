//! Domain types shared across the feeds and the dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for the configured location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_celsius: f64,
    /// Short condition label, e.g. "Clouds" or "Partly Cloudy".
    pub condition: String,
    pub location: String,
}

/// A single news headline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
}

/// A market quote (crypto pair or index).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Display symbol, e.g. "BTC/USD" or "S&P 500".
    pub symbol: String,
    pub name: String,
    pub price: f64,
    /// Absolute change over the reference window.
    pub change: f64,
    /// Relative change in percent (2.8 means +2.8%).
    pub change_percent: f64,
}

impl Quote {
    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}
