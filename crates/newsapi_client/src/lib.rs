//! NewsAPI top-headlines client.
//!
//! Queries either an explicit source list or a country + category pair
//! (NewsAPI rejects mixing the two) and cleans headlines for display.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::config::NewsConfig;
use common::rate_limit::ApiBudget;
use common::{Error, Headline, NewsFetcher};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
const PAGE_SIZE: u32 = 10;
const REMOVED_MARKER: &str = "[Removed]";

/// NewsAPI client.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    category: String,
    country: String,
    sources: Vec<String>,
    budget: ApiBudget,
}

/// Response from `GET /top-headlines`.
#[derive(Debug, Deserialize)]
pub struct TopHeadlinesResponse {
    pub status: String,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<u32>,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub source: ArticleSource,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "publishedAt", default)]
    pub published_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl NewsApiClient {
    pub fn new(config: &NewsConfig, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent("ttime/0.1 (ambient dashboard)")
            .pool_max_idle_per_host(2)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(format!("failed to build NewsAPI HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: config.api_key.clone(),
            category: config.category.clone(),
            country: config.country.clone(),
            sources: config.sources.clone(),
            budget: ApiBudget::newsapi(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Query parameters for `/top-headlines`, key included.
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = if self.sources.is_empty() {
            vec![
                ("country", self.country.clone()),
                ("category", self.category.clone()),
            ]
        } else {
            vec![("sources", self.sources.join(","))]
        };
        query.push(("pageSize", PAGE_SIZE.to_string()));
        query.push(("apiKey", self.api_key.clone()));
        query
    }

    pub async fn fetch_raw(&self) -> Result<TopHeadlinesResponse, Error> {
        if self.api_key.trim().is_empty() {
            return Err(Error::News("API key not configured".into()));
        }
        self.budget.acquire()?;

        let url = format!("{}/top-headlines", self.base_url);
        debug!(
            "Fetching NewsAPI headlines: {} sources={:?} country={} category={}",
            url, self.sources, self.country, self.category
        );

        let resp = self
            .client
            .get(&url)
            .query(&self.query())
            .send()
            .await
            .map_err(|e| Error::Http(format!("NewsAPI request: {e}")))?;

        let status = resp.status().as_u16();
        debug!("NewsAPI response status: {}", status);
        if status == 401 {
            return Err(Error::Unauthorized("NewsAPI rejected the API key".into()));
        }
        if !(200..300).contains(&status) {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::News(format!(
                "NewsAPI returned {}: {}",
                status,
                body.chars().take(300).collect::<String>()
            )));
        }

        resp.json::<TopHeadlinesResponse>()
            .await
            .map_err(|e| Error::News(format!("JSON parse error: {e}")))
    }
}

#[async_trait]
impl NewsFetcher for NewsApiClient {
    async fn fetch_headlines(&self) -> Result<Vec<Headline>, Error> {
        let raw = self.fetch_raw().await?;
        let headlines = to_headlines(raw, Utc::now())?;
        debug!("Loaded {} headlines", headlines.len());
        Ok(headlines)
    }
}

fn to_headlines(raw: TopHeadlinesResponse, now: DateTime<Utc>) -> Result<Vec<Headline>, Error> {
    if raw.status != "ok" {
        return Err(Error::News(
            raw.message.unwrap_or_else(|| "Unknown error".to_string()),
        ));
    }

    Ok(raw
        .articles
        .into_iter()
        .filter(|a| !a.title.contains(REMOVED_MARKER))
        .map(|a| Headline {
            title: strip_source_suffix(&a.title).to_string(),
            source: a.source.name,
            published_at: DateTime::parse_from_rfc3339(&a.published_at)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or(now),
        })
        .collect())
}

/// Drop a trailing " - Outlet" (or en-dash) attribution from a title.
fn strip_source_suffix(title: &str) -> &str {
    title
        .rfind(" - ")
        .or_else(|| title.rfind(" – "))
        .map(|idx| &title[..idx])
        .unwrap_or(title)
}
