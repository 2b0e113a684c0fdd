//! Cache Statistics Module
//!
//! Tracks cache behavior: hits, misses, evictions and lazy expiries.

use serde::Serialize;

// == Cache Stats ==
/// Counters for one cache instance. Logged for diagnostics, never served.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Fresh lookups that returned a value
    pub hits: u64,
    /// Lookups that found nothing usable (absent or expired)
    pub misses: u64,
    /// Entries removed to make room at capacity
    pub evictions: u64,
    /// Entries removed on read because their max age had elapsed
    pub expirations: u64,
}

impl CacheStats {
    /// Creates stats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expiry(&mut self) {
        self.expirations += 1;
    }
}
