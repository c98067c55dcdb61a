//! Fetcher contracts for the three data domains.
//!
//! Live clients, mocks, and the caching wrapper all implement these, so the
//! dashboard only ever sees trait objects.

use async_trait::async_trait;

use crate::{Headline, Quote, Result, WeatherReading};

#[async_trait]
pub trait WeatherFetcher: Send + Sync {
    async fn fetch_current(&self) -> Result<WeatherReading>;
}

#[async_trait]
pub trait NewsFetcher: Send + Sync {
    async fn fetch_headlines(&self) -> Result<Vec<Headline>>;
}

#[async_trait]
pub trait MarketFetcher: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<Vec<Quote>>;
}
