//! Application configuration types.

use serde::{Deserialize, Serialize};

/// Top-level app configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Use live APIs (true) or the built-in mock feeds (false).
    #[serde(default = "default_true")]
    pub use_live_data: bool,

    /// Wrap every feed in a response cache.
    #[serde(default = "default_true")]
    pub enable_caching: bool,

    /// How long a cached response is served before a live fetch (seconds).
    /// 300s keeps weather around 288 calls/day and news around 96 calls/day.
    #[serde(default = "default_cache_duration")]
    pub cache_duration_secs: u64,

    /// Per-request HTTP timeout (seconds).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Dashboard refresh interval (seconds).
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Log every API request and cache hit at debug level.
    #[serde(default)]
    pub debug_api_requests: bool,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub news: NewsConfig,
}

/// OpenWeather settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeather API key. Usually supplied via `WEATHER_API_KEY`.
    #[serde(default)]
    pub api_key: String,

    /// City name passed as the `q` query parameter.
    #[serde(default = "default_location")]
    pub location: String,
}

/// NewsAPI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// NewsAPI key. Usually supplied via `NEWS_API_KEY`.
    #[serde(default)]
    pub api_key: String,

    /// general, business, technology, science, health, sports, entertainment.
    #[serde(default = "default_news_category")]
    pub category: String,

    /// ISO 3166-1 alpha-2 country code.
    #[serde(default = "default_news_country")]
    pub country: String,

    /// Explicit source ids (e.g. "bbc-news"). When non-empty these replace
    /// country + category, which NewsAPI does not allow mixing.
    #[serde(default)]
    pub sources: Vec<String>,
}

impl AppConfig {
    /// Human-readable configuration report. API keys are never printed.
    pub fn status_lines(&self) -> Vec<String> {
        fn configured(key: &str) -> &'static str {
            if key.trim().is_empty() {
                "not configured"
            } else {
                "configured"
            }
        }

        let sources = if self.news.sources.is_empty() {
            "none (using category)".to_string()
        } else {
            self.news.sources.join(", ")
        };

        vec![
            format!(
                "Mode: {}",
                if self.use_live_data { "LIVE" } else { "MOCK" }
            ),
            format!("Weather key: {}", configured(&self.weather.api_key)),
            format!("News key: {}", configured(&self.news.api_key)),
            "Markets: no key required".to_string(),
            format!(
                "News: category={} country={} sources={}",
                self.news.category, self.news.country, sources
            ),
            format!("Weather location: {}", self.weather.location),
            format!(
                "Cache: {} ({}s), request timeout {}s, refresh every {}s",
                if self.enable_caching { "on" } else { "off" },
                self.cache_duration_secs,
                self.request_timeout_secs,
                self.refresh_interval_secs
            ),
            format!(
                "API request logging: {}",
                if self.debug_api_requests { "on" } else { "off" }
            ),
        ]
    }
}

// ── Defaults ──────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}

fn default_cache_duration() -> u64 {
    300
}
fn default_request_timeout() -> u64 {
    10
}
fn default_refresh_interval() -> u64 {
    60
}

fn default_location() -> String {
    "Prague".into()
}
fn default_news_category() -> String {
    "general".into()
}
fn default_news_country() -> String {
    "us".into()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            location: default_location(),
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            category: default_news_category(),
            country: default_news_country(),
            sources: Vec::new(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            use_live_data: true,
            enable_caching: true,
            cache_duration_secs: default_cache_duration(),
            request_timeout_secs: default_request_timeout(),
            refresh_interval_secs: default_refresh_interval(),
            debug_api_requests: false,
            weather: WeatherConfig::default(),
            news: NewsConfig::default(),
        }
    }
}
