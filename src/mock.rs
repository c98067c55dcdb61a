//! Canned feeds for offline runs and for when an API key is missing.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use common::{Headline, MarketFetcher, NewsFetcher, Quote, Result, WeatherFetcher, WeatherReading};
use tokio::time::sleep;

const SIMULATED_LATENCY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, Default)]
pub struct MockWeather;

#[async_trait]
impl WeatherFetcher for MockWeather {
    async fn fetch_current(&self) -> Result<WeatherReading> {
        sleep(SIMULATED_LATENCY).await;
        Ok(WeatherReading {
            temperature_celsius: 22.0,
            condition: "Partly Cloudy".into(),
            location: "Prague".into(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MockNews;

#[async_trait]
impl NewsFetcher for MockNews {
    async fn fetch_headlines(&self) -> Result<Vec<Headline>> {
        sleep(SIMULATED_LATENCY).await;
        let now = Utc::now();
        let headline = |title: &str, source: &str| Headline {
            title: title.into(),
            source: source.into(),
            published_at: now,
        };
        Ok(vec![
            headline("Global Leaders Gather for Climate Summit in Geneva", "World News"),
            headline("New Breakthrough in Quantum Computing Announced", "Technology"),
            headline("Markets Rally on Positive Economic Data", "Business"),
            headline("International Space Station Prepares for New Module", "Science"),
            headline("Renewable Energy Investments Reach Record Levels", "Environment"),
        ])
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MockMarket;

#[async_trait]
impl MarketFetcher for MockMarket {
    async fn fetch_snapshot(&self) -> Result<Vec<Quote>> {
        sleep(SIMULATED_LATENCY).await;
        Ok(vec![
            Quote {
                symbol: "BTC/USD".into(),
                name: "Bitcoin".into(),
                price: 45234.50,
                change: 1234.50,
                change_percent: 2.8,
            },
            Quote {
                symbol: "S&P 500".into(),
                name: "S&P 500".into(),
                price: 4789.32,
                change: -12.45,
                change_percent: -0.26,
            },
        ])
    }
}
