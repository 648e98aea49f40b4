//! In-memory result caching using moka
//!
//! Memoizes quotation breakdowns by fingerprint. The fingerprint already
//! encodes the global-parameters version, so a parameter change never
//! serves a stale entry; the TTL is a backstop for anything the version
//! token misses.

use moka::future::Cache;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::quoting::responses::QuotationBreakdown;

/// Quotation result cache with hit/miss instrumentation
#[derive(Clone)]
pub struct QuoteCache {
    /// Computed breakdowns (fingerprint -> breakdown)
    results: Cache<String, Arc<QuotationBreakdown>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl QuoteCache {
    /// Create a new cache instance with the configured TTL
    pub fn new() -> Self {
        Self {
            // Quotation results: 10k entries, 1 hour TTL, 15 min idle
            results: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(Duration::from_secs(60 * 60))
                .time_to_idle(Duration::from_secs(15 * 60))
                .build(),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Look up a breakdown by fingerprint, counting the outcome.
    pub async fn get(&self, fingerprint: &str) -> Option<Arc<QuotationBreakdown>> {
        match self.results.get(fingerprint).await {
            Some(cached) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(cached)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub async fn insert(&self, fingerprint: String, breakdown: Arc<QuotationBreakdown>) {
        self.results.insert(fingerprint, breakdown).await;
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.results.entry_count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Invalidate all cached results
    pub fn invalidate_all(&self) {
        self.results.invalidate_all();
        info!("Quotation result cache invalidated");
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
}
