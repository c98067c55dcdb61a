//! Fetcher wrapper that serves from a `ResponseCache`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::{Headline, MarketFetcher, NewsFetcher, Quote, Result, WeatherFetcher, WeatherReading};
use tracing::debug;

use crate::cache::ResponseCache;
use crate::clock::Clock;

/// Wraps one fetch collaborator `F` with a cache of its output `T`.
///
/// A failed fetch is returned unchanged and never touches the cache, so the
/// previous entry keeps ageing from its own fetch time.
pub struct CachedFetcher<F: ?Sized, T> {
    domain: &'static str,
    inner: Arc<F>,
    cache: ResponseCache<T>,
}

impl<F: ?Sized, T: Clone> CachedFetcher<F, T> {
    pub fn new(domain: &'static str, inner: Arc<F>, duration: Duration) -> Self {
        Self {
            domain,
            inner,
            cache: ResponseCache::new(duration),
        }
    }

    pub fn with_clock(
        domain: &'static str,
        inner: Arc<F>,
        duration: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            domain,
            inner,
            cache: ResponseCache::with_clock(duration, clock),
        }
    }

    /// Serve the cached value, or run `fetch` and cache its success.
    pub async fn fetch_with<Fut>(&self, fetch: impl FnOnce(Arc<F>) -> Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        if let Some(cached) = self.cache.get() {
            debug!("Using cached {} data", self.domain);
            return Ok(cached);
        }

        debug!("Fetching fresh {} data", self.domain);
        let fresh = fetch(Arc::clone(&self.inner)).await?;
        self.cache.set(fresh.clone());
        Ok(fresh)
    }

    pub fn cache(&self) -> &ResponseCache<T> {
        &self.cache
    }

    pub fn domain(&self) -> &'static str {
        self.domain
    }
}

#[async_trait]
impl<F> WeatherFetcher for CachedFetcher<F, WeatherReading>
where
    F: WeatherFetcher + ?Sized,
{
    async fn fetch_current(&self) -> Result<WeatherReading> {
        self.fetch_with(|inner| async move { inner.fetch_current().await })
            .await
    }
}

#[async_trait]
impl<F> NewsFetcher for CachedFetcher<F, Vec<Headline>>
where
    F: NewsFetcher + ?Sized,
{
    async fn fetch_headlines(&self) -> Result<Vec<Headline>> {
        self.fetch_with(|inner| async move { inner.fetch_headlines().await })
            .await
    }
}

#[async_trait]
impl<F> MarketFetcher for CachedFetcher<F, Vec<Quote>>
where
    F: MarketFetcher + ?Sized,
{
    async fn fetch_snapshot(&self) -> Result<Vec<Quote>> {
        self.fetch_with(|inner| async move { inner.fetch_snapshot().await })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use common::Error;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Replays scripted temperatures; `None` entries fail.
    struct ScriptedWeather {
        script: Mutex<VecDeque<Option<f64>>>,
        calls: AtomicUsize,
    }

    impl ScriptedWeather {
        fn new(script: &[Option<f64>]) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.iter().copied().collect()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WeatherFetcher for ScriptedWeather {
        async fn fetch_current(&self) -> Result<WeatherReading> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.script.lock().unwrap().pop_front().flatten();
            match next {
                Some(temperature_celsius) => Ok(WeatherReading {
                    temperature_celsius,
                    condition: "Clear".into(),
                    location: "Prague".into(),
                }),
                None => Err(Error::Weather("upstream unavailable".into())),
            }
        }
    }

    struct SlowNews {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl NewsFetcher for SlowNews {
        async fn fetch_headlines(&self) -> Result<Vec<Headline>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(vec![Headline {
                title: format!("headline {}", n),
                source: "Wire".into(),
                published_at: chrono::Utc::now(),
            }])
        }
    }

    fn cached_weather(
        source: &Arc<ScriptedWeather>,
        clock: &ManualClock,
    ) -> CachedFetcher<ScriptedWeather, WeatherReading> {
        CachedFetcher::with_clock(
            "weather",
            Arc::clone(source),
            Duration::from_secs(300),
            Arc::new(clock.clone()),
        )
    }

    #[tokio::test]
    async fn test_hit_skips_wrapped_fetcher() {
        let source = ScriptedWeather::new(&[Some(21.0), Some(30.0)]);
        let clock = ManualClock::new();
        let cached = cached_weather(&source, &clock);

        assert_eq!(cached.fetch_current().await.unwrap().temperature_celsius, 21.0);
        clock.advance(Duration::from_secs(120));
        assert_eq!(cached.fetch_current().await.unwrap().temperature_celsius, 21.0);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_miss_after_expiry_refetches() {
        let source = ScriptedWeather::new(&[Some(21.0), Some(30.0)]);
        let clock = ManualClock::new();
        let cached = cached_weather(&source, &clock);

        cached.fetch_current().await.unwrap();
        clock.advance(Duration::from_secs(300));
        assert_eq!(cached.fetch_current().await.unwrap().temperature_celsius, 30.0);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_failure_propagates_and_keeps_previous_entry() {
        let source = ScriptedWeather::new(&[Some(21.0), None, Some(25.0)]);
        let clock = ManualClock::new();
        let cached = cached_weather(&source, &clock);

        cached.fetch_current().await.unwrap();
        let first_fetch_at = cached.cache().entry().unwrap().fetched_at;

        clock.advance(Duration::from_secs(301));
        let err = cached.fetch_current().await.unwrap_err();
        assert!(matches!(err, Error::Weather(_)));

        let entry = cached.cache().entry().unwrap();
        assert_eq!(entry.value.temperature_celsius, 21.0);
        assert_eq!(entry.fetched_at, first_fetch_at);

        // The next call retries rather than serving the expired value.
        assert_eq!(cached.fetch_current().await.unwrap().temperature_celsius, 25.0);
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_failure_on_empty_cache_leaves_it_empty() {
        let source = ScriptedWeather::new(&[None]);
        let clock = ManualClock::new();
        let cached = cached_weather(&source, &clock);

        assert!(cached.fetch_current().await.is_err());
        assert!(cached.cache().entry().is_none());
    }

    #[tokio::test]
    async fn test_dyn_fetcher_can_be_wrapped() {
        let source: Arc<dyn WeatherFetcher> = ScriptedWeather::new(&[Some(5.0)]);
        let cached: CachedFetcher<dyn WeatherFetcher, WeatherReading> =
            CachedFetcher::new("weather", source, Duration::from_secs(60));
        let as_trait: &dyn WeatherFetcher = &cached;
        assert_eq!(as_trait.fetch_current().await.unwrap().temperature_celsius, 5.0);
        assert_eq!(cached.domain(), "weather");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_misses_both_fetch() {
        let source = Arc::new(SlowNews {
            calls: AtomicUsize::new(0),
        });
        let cached: Arc<CachedFetcher<SlowNews, Vec<Headline>>> = Arc::new(CachedFetcher::new(
            "news",
            Arc::clone(&source),
            Duration::from_secs(300),
        ));

        let a = tokio::spawn({
            let cached = Arc::clone(&cached);
            async move { cached.fetch_headlines().await }
        });
        let b = tokio::spawn({
            let cached = Arc::clone(&cached);
            async move { cached.fetch_headlines().await }
        });
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        // No single-flight: both callers went to the source.
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cached.cache().get().map(|h| h.len()), Some(1));
    }
}
