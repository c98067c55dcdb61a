//! Response caching for the dashboard feeds.
//!
//! One single-entry, time-windowed cache per data domain, and a fetcher
//! wrapper that serves from it. Concurrent misses are not de-duplicated:
//! two callers racing past an expired entry both fetch, and whichever
//! `set` lands last wins.

pub mod cache;
pub mod cached;
pub mod clock;

pub use cache::{CacheEntry, ResponseCache};
pub use cached::CachedFetcher;
pub use clock::{Clock, ManualClock, SystemClock};
