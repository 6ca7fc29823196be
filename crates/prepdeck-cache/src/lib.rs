//! Memoization cache for analysis results.
//!
//! One `Arc<AnalysisCache>` handle is created at process start and shared by
//! reference with the analysis pipeline. The lock is never held across an
//! await; two concurrent misses on the same key both compute and both write,
//! last write wins.

use lru::LruCache;
use parking_lot::Mutex;
use prepdeck_core::AnalysisResult;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Time source for TTL checks, injectable so expiry is testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time, the production clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for tests.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

/// Cache performance counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
}

struct Entry {
    created_at: Instant,
    value: AnalysisResult,
}

struct CacheInner {
    lru: LruCache<String, Entry>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

/// LRU cache with optional TTL for analysis results.
pub struct AnalysisCache {
    max_entries: usize,
    ttl: Option<Duration>,
    clock: Arc<dyn Clock>,
    inner: Mutex<CacheInner>,
}

impl AnalysisCache {
    /// Creates a cache holding at most `max_entries` results. A `ttl` of
    /// `None` disables expiry.
    pub fn new(max_entries: usize, ttl: Option<Duration>) -> Self {
        Self::with_clock(max_entries, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(max_entries: usize, ttl: Option<Duration>, clock: Arc<dyn Clock>) -> Self {
        let cap = NonZeroUsize::new(max_entries.max(1)).unwrap();
        Self {
            max_entries: max_entries.max(1),
            ttl,
            clock,
            inner: Mutex::new(CacheInner {
                lru: LruCache::new(cap),
                hits: 0,
                misses: 0,
                evictions: 0,
            }),
        }
    }

    /// Looks up a key. An expired entry is removed on observation and counts
    /// as a miss.
    pub fn get(&self, key: &str) -> Option<AnalysisResult> {
        let now = self.clock.now();
        let mut inner = self.inner.lock();

        let live = inner.lru.get(key).and_then(|entry| {
            let expired = self
                .ttl
                .map_or(false, |ttl| now.duration_since(entry.created_at) > ttl);
            if expired {
                None
            } else {
                Some(entry.value.clone())
            }
        });

        match live {
            Some(value) => {
                inner.hits += 1;
                Some(value)
            }
            None => {
                if inner.lru.pop(key).is_some() {
                    debug!(key_len = key.len(), "cache entry expired");
                }
                inner.misses += 1;
                None
            }
        }
    }

    /// Inserts a result, evicting the least-recently-used entry when full.
    pub fn insert(&self, key: String, value: AnalysisResult) {
        let mut inner = self.inner.lock();

        if inner.lru.len() == self.max_entries && !inner.lru.contains(&key) {
            inner.evictions += 1;
        }
        let entry = Entry {
            created_at: self.clock.now(),
            value,
        };
        inner.lru.put(key, entry);
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
            entries: inner.lru.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().lru.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.lock().lru.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prepdeck_core::GraphPoint;

    fn result(complexity: &str) -> AnalysisResult {
        AnalysisResult {
            complexity: complexity.to_string(),
            graph_data: vec![GraphPoint { n: 1, ops: 1.0 }],
            explanation: "test".to_string(),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let cache = AnalysisCache::new(4, None);
        assert!(cache.get("k").is_none());

        cache.insert("k".to_string(), result("O(n)"));
        let hit = cache.get("k").unwrap();
        assert_eq!(hit.complexity, "O(n)");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_lru_eviction_at_capacity() {
        let cache = AnalysisCache::new(2, None);
        cache.insert("a".to_string(), result("O(1)"));
        cache.insert("b".to_string(), result("O(n)"));
        // Touch "a" so "b" becomes the eviction candidate.
        assert!(cache.get("a").is_some());

        cache.insert("c".to_string(), result("O(n^2)"));
        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());
        assert_eq!(cache.stats().evictions, 1);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_overwrite_is_not_an_eviction() {
        let cache = AnalysisCache::new(1, None);
        cache.insert("a".to_string(), result("O(1)"));
        cache.insert("a".to_string(), result("O(n)"));
        assert_eq!(cache.stats().evictions, 0);
        assert_eq!(cache.get("a").unwrap().complexity, "O(n)");
    }

    #[test]
    fn test_ttl_expiry_with_manual_clock() {
        let clock = Arc::new(ManualClock::new());
        let cache =
            AnalysisCache::with_clock(4, Some(Duration::from_secs(60)), clock.clone());

        cache.insert("k".to_string(), result("O(n)"));
        clock.advance(Duration::from_secs(59));
        assert!(cache.get("k").is_some());

        clock.advance(Duration::from_secs(2));
        assert!(cache.get("k").is_none());
        assert_eq!(cache.len(), 0);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_no_ttl_never_expires() {
        let clock = Arc::new(ManualClock::new());
        let cache = AnalysisCache::with_clock(4, None, clock.clone());

        cache.insert("k".to_string(), result("O(n)"));
        clock.advance(Duration::from_secs(24 * 60 * 60));
        assert!(cache.get("k").is_some());
    }

    #[test]
    fn test_clear() {
        let cache = AnalysisCache::new(4, None);
        cache.insert("k".to_string(), result("O(n)"));
        cache.clear();
        assert!(cache.is_empty());
    }
}
