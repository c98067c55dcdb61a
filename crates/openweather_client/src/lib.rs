//! OpenWeather current-conditions client.
//!
//! Fetches `/weather` for a named city in metric units and converts it to
//! the shared `WeatherReading`.

use async_trait::async_trait;
use common::config::WeatherConfig;
use common::rate_limit::ApiBudget;
use common::{Error, WeatherFetcher, WeatherReading};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// OpenWeather API client.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    location: String,
    budget: ApiBudget,
}

// ── OpenWeather response types ────────────────────────────────────────

/// Response from `GET /weather`.
#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    #[serde(default)]
    pub humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ConditionEntry {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
}

// ── Implementation ────────────────────────────────────────────────────

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent("ttime/0.1 (ambient dashboard)")
            .pool_max_idle_per_host(2)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(format!("failed to build OpenWeather HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: config.api_key.clone(),
            location: config.location.clone(),
            budget: ApiBudget::openweather(),
        })
    }

    /// Point the client at another host (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Fetch raw current conditions for the configured location.
    pub async fn fetch_raw(&self) -> Result<CurrentWeatherResponse, Error> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Weather("API key not configured".into()));
        }
        self.budget.acquire()?;

        let url = format!("{}/weather", self.base_url);
        debug!("Fetching OpenWeather current conditions: {} q={}", url, self.location);

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("q", self.location.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| Error::Http(format!("OpenWeather request for {}: {e}", self.location)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Weather(format!(
                "OpenWeather returned {} for {}: {}",
                status.as_u16(),
                self.location,
                body.chars().take(300).collect::<String>()
            )));
        }

        resp.json::<CurrentWeatherResponse>()
            .await
            .map_err(|e| Error::Weather(format!("JSON parse error for {}: {e}", self.location)))
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherClient {
    async fn fetch_current(&self) -> Result<WeatherReading, Error> {
        let raw = self.fetch_raw().await?;
        Ok(to_reading(raw))
    }
}

fn to_reading(raw: CurrentWeatherResponse) -> WeatherReading {
    let condition = raw
        .weather
        .first()
        .map(|w| capitalize(&w.main))
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    WeatherReading {
        temperature_celsius: raw.main.temp,
        condition,
        location: raw.name,
    }
}

/// Upper-case the first letter of each word, lower-case the rest.
fn capitalize(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
