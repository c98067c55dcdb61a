//! Builds the three feeds from configuration.
//!
//! Live or mock per `use_live_data`, with a mock fallback when a required
//! API key is missing, each optionally wrapped in its own response cache.

use std::sync::Arc;
use std::time::Duration;

use common::config::AppConfig;
use common::{Error, Headline, MarketFetcher, NewsFetcher, Quote, WeatherFetcher, WeatherReading};
use feed_cache::CachedFetcher;
use market_client::MarketClient;
use newsapi_client::NewsApiClient;
use openweather_client::OpenWeatherClient;
use tracing::{info, warn};

use crate::mock::{MockMarket, MockNews, MockWeather};

/// The feeds the dashboard reads from.
#[derive(Clone)]
pub struct Services {
    pub weather: Arc<dyn WeatherFetcher>,
    pub news: Arc<dyn NewsFetcher>,
    pub market: Arc<dyn MarketFetcher>,
}

impl Services {
    pub fn from_config(cfg: &AppConfig) -> Result<Self, Error> {
        let timeout = Duration::from_secs(cfg.request_timeout_secs);
        let weather = weather_source(cfg, timeout)?;
        let news = news_source(cfg, timeout)?;
        let market = market_source(cfg, timeout)?;

        if !cfg.enable_caching {
            info!("Response caching disabled");
            return Ok(Self {
                weather,
                news,
                market,
            });
        }

        let ttl = Duration::from_secs(cfg.cache_duration_secs);
        Ok(Self {
            weather: Arc::new(CachedFetcher::<dyn WeatherFetcher, WeatherReading>::new(
                "weather", weather, ttl,
            )),
            news: Arc::new(CachedFetcher::<dyn NewsFetcher, Vec<Headline>>::new(
                "news", news, ttl,
            )),
            market: Arc::new(CachedFetcher::<dyn MarketFetcher, Vec<Quote>>::new(
                "markets", market, ttl,
            )),
        })
    }
}

fn weather_source(cfg: &AppConfig, timeout: Duration) -> Result<Arc<dyn WeatherFetcher>, Error> {
    if !cfg.use_live_data {
        return Ok(Arc::new(MockWeather));
    }
    if cfg.weather.api_key.trim().is_empty() {
        warn!("Weather API key not configured, falling back to mock weather");
        return Ok(Arc::new(MockWeather));
    }
    Ok(Arc::new(OpenWeatherClient::new(&cfg.weather, timeout)?))
}

fn news_source(cfg: &AppConfig, timeout: Duration) -> Result<Arc<dyn NewsFetcher>, Error> {
    if !cfg.use_live_data {
        return Ok(Arc::new(MockNews));
    }
    if cfg.news.api_key.trim().is_empty() {
        warn!("News API key not configured, falling back to mock news");
        return Ok(Arc::new(MockNews));
    }
    Ok(Arc::new(NewsApiClient::new(&cfg.news, timeout)?))
}

fn market_source(cfg: &AppConfig, timeout: Duration) -> Result<Arc<dyn MarketFetcher>, Error> {
    if !cfg.use_live_data {
        return Ok(Arc::new(MockMarket));
    }
    Ok(Arc::new(MarketClient::new(timeout)?))
}
