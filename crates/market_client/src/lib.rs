//! Market snapshot client.
//!
//! Bitcoin comes from CoinGecko's simple-price endpoint, the S&P 500 from
//! Yahoo Finance's chart endpoint. Neither needs an API key.

use async_trait::async_trait;
use common::rate_limit::ApiBudget;
use common::{Error, MarketFetcher, Quote};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";
const YAHOO_CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
/// `^GSPC`, pre-encoded for the path segment.
const SP500_SYMBOL: &str = "%5EGSPC";

/// CoinGecko + Yahoo Finance client.
#[derive(Debug, Clone)]
pub struct MarketClient {
    client: reqwest::Client,
    crypto_base_url: String,
    stock_base_url: String,
    budget: ApiBudget,
}

// ── Response types ────────────────────────────────────────────────────

/// One coin from `/simple/price?...&include_24hr_change=true`.
#[derive(Debug, Deserialize)]
pub struct CoinPrice {
    pub usd: f64,
    #[serde(default)]
    pub usd_24h_change: f64,
}

/// Response from `/v8/finance/chart/{symbol}`.
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Vec<ChartResult>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: Option<ChartMeta>,
}

#[derive(Debug, Deserialize)]
pub struct ChartMeta {
    #[serde(rename = "regularMarketPrice", default)]
    pub regular_market_price: Option<f64>,
    #[serde(rename = "previousClose", default)]
    pub previous_close: Option<f64>,
    #[serde(rename = "chartPreviousClose", default)]
    pub chart_previous_close: Option<f64>,
}

// ── Implementation ────────────────────────────────────────────────────

impl MarketClient {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent("ttime/0.1 (ambient dashboard)")
            .pool_max_idle_per_host(2)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(format!("failed to build market HTTP client: {e}")))?;

        Ok(Self {
            client,
            crypto_base_url: COINGECKO_BASE_URL.to_string(),
            stock_base_url: YAHOO_CHART_BASE_URL.to_string(),
            budget: ApiBudget::markets(),
        })
    }

    pub fn with_base_urls(mut self, crypto: impl Into<String>, stock: impl Into<String>) -> Self {
        self.crypto_base_url = crypto.into().trim_end_matches('/').to_string();
        self.stock_base_url = stock.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, Error> {
        self.budget.acquire()?;
        debug!("Fetching market data: {}", url);

        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Http(format!("market request {url}: {e}")))?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(Error::Market(format!("{url} returned {status}")));
        }

        resp.json::<T>()
            .await
            .map_err(|e| Error::Market(format!("JSON parse error for {url}: {e}")))
    }

    pub async fn fetch_bitcoin(&self) -> Result<Quote, Error> {
        let url = format!("{}/simple/price", self.crypto_base_url);
        let prices: HashMap<String, CoinPrice> = self
            .get_json(
                &url,
                &[
                    ("ids", "bitcoin"),
                    ("vs_currencies", "usd"),
                    ("include_24hr_change", "true"),
                ],
            )
            .await?;
        bitcoin_quote(&prices)
    }

    pub async fn fetch_sp500(&self) -> Result<Quote, Error> {
        let url = format!("{}/{}", self.stock_base_url, SP500_SYMBOL);
        let chart: ChartResponse = self.get_json(&url, &[]).await?;
        sp500_quote(&chart)
    }
}

#[async_trait]
impl MarketFetcher for MarketClient {
    async fn fetch_snapshot(&self) -> Result<Vec<Quote>, Error> {
        let (btc, sp500) = tokio::join!(self.fetch_bitcoin(), self.fetch_sp500());
        combine_snapshot(btc, sp500)
    }
}

fn bitcoin_quote(prices: &HashMap<String, CoinPrice>) -> Result<Quote, Error> {
    let btc = prices
        .get("bitcoin")
        .ok_or_else(|| Error::Market("no bitcoin price in response".into()))?;

    Ok(Quote {
        symbol: "BTC/USD".into(),
        name: "Bitcoin".into(),
        price: btc.usd,
        change: btc.usd * btc.usd_24h_change / 100.0,
        change_percent: btc.usd_24h_change,
    })
}

fn sp500_quote(chart: &ChartResponse) -> Result<Quote, Error> {
    let meta = chart
        .chart
        .result
        .first()
        .and_then(|r| r.meta.as_ref())
        .ok_or_else(|| Error::Market("no S&P 500 chart result".into()))?;

    let (Some(price), Some(previous_close)) = (
        meta.regular_market_price,
        meta.previous_close.or(meta.chart_previous_close),
    ) else {
        return Err(Error::Market("S&P 500 chart missing price fields".into()));
    };
    if previous_close == 0.0 {
        return Err(Error::Market("S&P 500 previous close is zero".into()));
    }

    let change = price - previous_close;
    Ok(Quote {
        symbol: "S&P 500".into(),
        name: "S&P 500".into(),
        price,
        change,
        change_percent: change / previous_close * 100.0,
    })
}

/// Both quotes when both succeed; Bitcoin alone when only the index fails.
/// A Bitcoin failure fails the snapshot.
fn combine_snapshot(
    btc: Result<Quote, Error>,
    sp500: Result<Quote, Error>,
) -> Result<Vec<Quote>, Error> {
    match (btc, sp500) {
        (Ok(btc), Ok(sp500)) => Ok(vec![btc, sp500]),
        (Ok(btc), Err(e)) => {
            warn!("S&P 500 unavailable, serving Bitcoin only: {}", e);
            Ok(vec![btc])
        }
        (Err(e), _) => Err(e),
    }
}
