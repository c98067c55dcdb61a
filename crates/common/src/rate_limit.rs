//! Request budgets for the free-tier third-party APIs.
//!
//! The response cache keeps normal traffic far below these limits; the
//! budget is what stops a tight retry loop from burning a daily quota.

use governor::{Quota, RateLimiter as GovLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use crate::Error;

type DirectLimiter = GovLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Single-bucket request budget for one API.
#[derive(Debug, Clone)]
pub struct ApiBudget {
    domain: &'static str,
    limiter: Arc<DirectLimiter>,
}

impl ApiBudget {
    /// OpenWeather free tier: 60 calls/minute.
    pub fn openweather() -> Self {
        Self::per_minute("weather", 60)
    }

    /// NewsAPI developer tier: 100 requests/day.
    pub fn newsapi() -> Self {
        Self::per_period("news", 100, Duration::from_secs(24 * 60 * 60))
    }

    /// CoinGecko public API: roughly 30 calls/minute.
    pub fn markets() -> Self {
        Self::per_minute("markets", 30)
    }

    /// Budget of `calls` per minute.
    pub fn per_minute(domain: &'static str, calls: u32) -> Self {
        let quota = Quota::per_minute(non_zero(calls));
        Self {
            domain,
            limiter: Arc::new(GovLimiter::direct(quota)),
        }
    }

    /// Budget of `calls` spread over `period`, with the whole allowance
    /// available as a burst.
    pub fn per_period(domain: &'static str, calls: u32, period: Duration) -> Self {
        let calls = non_zero(calls);
        let replenish = period / calls.get();
        let quota = Quota::with_period(replenish)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(calls);
        Self {
            domain,
            limiter: Arc::new(GovLimiter::direct(quota)),
        }
    }

    /// Take one request slot, or fail with `Error::RateLimited`.
    pub fn acquire(&self) -> Result<(), Error> {
        self.limiter
            .check()
            .map_err(|_| Error::RateLimited {
                domain: self.domain,
            })
    }

    pub fn domain(&self) -> &'static str {
        self.domain
    }
}

fn non_zero(calls: u32) -> NonZeroU32 {
    NonZeroU32::new(calls).unwrap_or(NonZeroU32::MIN)
}
