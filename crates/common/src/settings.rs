//! User-facing dashboard settings.
//!
//! Stored as a flat JSON object of key → value. Loading is per key: a value
//! that no longer decodes (renamed enum variant, wrong type) falls back to
//! its default instead of discarding the whole file. Persistence is explicit;
//! the shell calls `save()` after it mutates settings.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

use crate::{Error, Quote};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppearanceMode {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    #[default]
    TwelveHour,
    TwentyFourHour,
}

impl TimeFormat {
    /// chrono format string for the clock face.
    pub fn pattern(self) -> &'static str {
        match self {
            TimeFormat::TwelveHour => "%-I:%M %p",
            TimeFormat::TwentyFourHour => "%H:%M",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockFontStyle {
    #[default]
    Standard,
    Monospaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Convert a Celsius reading into this unit.
    pub fn convert(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherLocation {
    #[default]
    Current,
    Berlin,
    NewYork,
    Tokyo,
    London,
    Paris,
    Sydney,
}

impl WeatherLocation {
    pub fn display_name(self) -> &'static str {
        match self {
            WeatherLocation::Current => "Current Location",
            WeatherLocation::Berlin => "Berlin",
            WeatherLocation::NewYork => "New York City",
            WeatherLocation::Tokyo => "Tokyo",
            WeatherLocation::London => "London",
            WeatherLocation::Paris => "Paris",
            WeatherLocation::Sydney => "Sydney",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsCategory {
    #[default]
    General,
    Technology,
    Business,
    Science,
    Health,
    Sports,
    Entertainment,
}

impl NewsCategory {
    /// Category id as NewsAPI expects it.
    pub fn as_query(self) -> &'static str {
        match self {
            NewsCategory::General => "general",
            NewsCategory::Technology => "technology",
            NewsCategory::Business => "business",
            NewsCategory::Science => "science",
            NewsCategory::Health => "health",
            NewsCategory::Sports => "sports",
            NewsCategory::Entertainment => "entertainment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsSource {
    World,
    Technology,
    Business,
    #[default]
    Bbc,
    Cnn,
    Reuters,
    ApNews,
    TheGuardian,
}

/// A ticker the markets panel can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketTicker {
    pub id: &'static str,
    pub symbol: &'static str,
    pub display_name: &'static str,
}

/// Every ticker the settings panel offers.
pub const AVAILABLE_TICKERS: [MarketTicker; 8] = [
    MarketTicker { id: "btc-usd", symbol: "BTC/USD", display_name: "Bitcoin" },
    MarketTicker { id: "sp500", symbol: "S&P 500", display_name: "S&P 500" },
    MarketTicker { id: "nasdaq", symbol: "NASDAQ", display_name: "NASDAQ" },
    MarketTicker { id: "dow", symbol: "DOW", display_name: "Dow Jones" },
    MarketTicker { id: "eth-usd", symbol: "ETH/USD", display_name: "Ethereum" },
    MarketTicker { id: "aapl", symbol: "AAPL", display_name: "Apple Inc." },
    MarketTicker { id: "tsla", symbol: "TSLA", display_name: "Tesla" },
    MarketTicker { id: "gold", symbol: "GOLD", display_name: "Gold" },
];

/// Persisted dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub appearance_mode: AppearanceMode,
    pub selected_gradient_index: u32,
    pub use_animated_gradient: bool,
    pub time_format: TimeFormat,
    pub clock_font_style: ClockFontStyle,
    /// Timezone identifier; "local" follows the host clock.
    pub timezone: String,
    pub temperature_unit: TemperatureUnit,
    pub show_weather_location: bool,
    pub weather_location: WeatherLocation,
    pub news_category: NewsCategory,
    pub news_source: NewsSource,
    pub enabled_tickers: BTreeSet<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            appearance_mode: AppearanceMode::default(),
            selected_gradient_index: 0,
            use_animated_gradient: false,
            time_format: TimeFormat::default(),
            clock_font_style: ClockFontStyle::default(),
            timezone: "local".into(),
            temperature_unit: TemperatureUnit::default(),
            show_weather_location: true,
            weather_location: WeatherLocation::default(),
            news_category: NewsCategory::default(),
            news_source: NewsSource::default(),
            enabled_tickers: ["btc-usd", "sp500"].iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Settings(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }

    /// Decode a flat key-value JSON object, key by key.
    pub fn from_json(contents: &str) -> Result<Self, Error> {
        let value: serde_json::Value = serde_json::from_str(contents)?;
        let serde_json::Value::Object(map) = value else {
            return Err(Error::Settings(
                "settings file must contain a JSON object".into(),
            ));
        };

        let mut settings = Self::default();
        read_key(&map, "appearance_mode", &mut settings.appearance_mode);
        read_key(&map, "selected_gradient_index", &mut settings.selected_gradient_index);
        read_key(&map, "use_animated_gradient", &mut settings.use_animated_gradient);
        read_key(&map, "time_format", &mut settings.time_format);
        read_key(&map, "clock_font_style", &mut settings.clock_font_style);
        read_key(&map, "timezone", &mut settings.timezone);
        read_key(&map, "temperature_unit", &mut settings.temperature_unit);
        read_key(&map, "show_weather_location", &mut settings.show_weather_location);
        read_key(&map, "weather_location", &mut settings.weather_location);
        read_key(&map, "news_category", &mut settings.news_category);
        read_key(&map, "news_source", &mut settings.news_source);
        read_key(&map, "enabled_tickers", &mut settings.enabled_tickers);
        Ok(settings)
    }

    /// Write settings to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.export_json()?)?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Pretty-printed JSON, as written by `save()`.
    pub fn export_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Quotes whose symbol belongs to an enabled ticker, in input order.
    pub fn visible_quotes<'a>(&self, quotes: &'a [Quote]) -> Vec<&'a Quote> {
        let enabled_symbols: Vec<&str> = AVAILABLE_TICKERS
            .iter()
            .filter(|t| self.enabled_tickers.contains(t.id))
            .map(|t| t.symbol)
            .collect();

        quotes
            .iter()
            .filter(|q| enabled_symbols.contains(&q.symbol.as_str()))
            .collect()
    }
}

fn read_key<T: DeserializeOwned>(
    map: &serde_json::Map<String, serde_json::Value>,
    key: &str,
    slot: &mut T,
) {
    let Some(raw) = map.get(key) else {
        return;
    };
    match serde_json::from_value::<T>(raw.clone()) {
        Ok(value) => *slot = value,
        Err(e) => warn!("Ignoring invalid setting {}={}: {}", key, raw, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(symbol: &str) -> Quote {
        Quote {
            symbol: symbol.into(),
            name: symbol.into(),
            price: 1.0,
            change: 0.0,
            change_percent: 0.0,
        }
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("ttime-settings-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = Settings::load(&temp_path("does-not-exist.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.enabled_tickers.contains("btc-usd"));
        assert_eq!(settings.news_source, NewsSource::Bbc);
    }

    #[test]
    fn test_save_then_load_preserves_changes() {
        let path = temp_path("roundtrip/settings.json");
        let mut settings = Settings::default();
        settings.time_format = TimeFormat::TwentyFourHour;
        settings.temperature_unit = TemperatureUnit::Fahrenheit;
        settings.enabled_tickers.insert("gold".into());

        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_key_keeps_default_others_apply() {
        let json = r#"{
            "appearance_mode": "dark",
            "time_format": "sundial",
            "selected_gradient_index": 3,
            "unknown_key": true
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.appearance_mode, AppearanceMode::Dark);
        assert_eq!(settings.time_format, TimeFormat::TwelveHour);
        assert_eq!(settings.selected_gradient_index, 3);
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(matches!(
            Settings::from_json("[1, 2, 3]"),
            Err(Error::Settings(_))
        ));
        assert!(matches!(Settings::from_json("{not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut settings = Settings::default();
        settings.show_weather_location = false;
        settings.news_category = NewsCategory::Science;
        settings.reset();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_visible_quotes_follow_enabled_tickers() {
        let quotes = vec![quote("BTC/USD"), quote("S&P 500"), quote("GOLD")];
        let mut settings = Settings::default();
        settings.enabled_tickers.remove("sp500");

        let visible = settings.visible_quotes(&quotes);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].symbol, "BTC/USD");
    }

    #[test]
    fn test_temperature_unit_conversion() {
        assert!((TemperatureUnit::Fahrenheit.convert(100.0) - 212.0).abs() < 1e-9);
        assert!((TemperatureUnit::Celsius.convert(21.5) - 21.5).abs() < 1e-9);
        assert_eq!(TemperatureUnit::Fahrenheit.symbol(), "°F");
    }
}
