//! # engram-tokens
//!
//! Token estimation for the fusion pipeline.
//!
//! The whole fusion core uses a single estimation function: whitespace
//! word counting. Budgets and compression ratios are defined in those
//! units, so mixing in another approximation (such as chars/4) would
//! silently change budget arithmetic. Repeated estimates for the same
//! text are served from a content-hash cache.

use moka::sync::Cache;

/// Default capacity of the estimate cache.
const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Estimates token counts by whitespace word-splitting.
///
/// Counting is cheap enough to run on every candidate of every request;
/// the cache earns its keep on texts that reappear across requests,
/// which stable memory units do constantly.
pub struct TokenEstimator {
    cache: Cache<String, usize>,
}

impl TokenEstimator {
    pub fn new(cache_capacity: u64) -> Self {
        Self {
            cache: Cache::new(cache_capacity),
        }
    }

    /// Estimate the token count of `text`.
    pub fn estimate(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }

    /// Estimate with content-hash caching.
    pub fn estimate_cached(&self, text: &str) -> usize {
        let hash = blake3::hash(text.as_bytes()).to_hex().to_string();
        if let Some(count) = self.cache.get(&hash) {
            return count;
        }
        let count = self.estimate(text);
        self.cache.insert(hash, count);
        count
    }
}

impl Default for TokenEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
