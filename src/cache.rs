//! Caller-owned LRU cache of classifications.
//!
//! Request logs repeat the same few hundred user agents over and over. The
//! cache keeps the `Copy` [`Classification`] for recently seen strings so a
//! hit skips scanning entirely. It is an ordinary value owned by the caller,
//! not shared state inside the engine; wrap it in a lock or keep one per
//! worker thread.
//!
//! ```
//! use fast_browser::{BrowserFamily, UserAgentCache};
//! use std::num::NonZeroUsize;
//!
//! let mut cache = UserAgentCache::new(NonZeroUsize::new(128).unwrap());
//! let ua = "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:40.0) Gecko/20100101 Firefox/40.1";
//!
//! assert_eq!(cache.classify(ua).family, BrowserFamily::Firefox);
//! assert_eq!(cache.classify(ua).family, BrowserFamily::Firefox);
//! assert_eq!(cache.stats().hits, 1);
//! ```

use crate::user_agent::{Classification, Parser};
use lru::LruCache;
use std::num::NonZeroUsize;

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that had to classify
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups that hit, 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache from raw user agent to classification.
pub struct UserAgentCache {
    parser: Parser,
    entries: LruCache<Box<str>, Classification>,
    stats: CacheStats,
}

impl UserAgentCache {
    /// Cache holding up to `capacity` entries, using the default parser.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::with_parser(capacity, Parser::new())
    }

    /// Cache backed by a custom parser configuration.
    pub fn with_parser(capacity: NonZeroUsize, parser: Parser) -> Self {
        Self {
            parser,
            entries: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Classify `raw`, reusing a cached result when present.
    pub fn classify(&mut self, raw: &str) -> Classification {
        if let Some(info) = self.entries.get(raw) {
            self.stats.hits += 1;
            return *info;
        }

        self.stats.misses += 1;
        let info = self.parser.classify(raw.as_bytes());
        self.entries.put(raw.into(), info);
        info
    }

    /// Whether `raw` is currently cached. Does not touch recency.
    pub fn contains(&self, raw: &str) -> bool {
        self.entries.contains(raw)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> NonZeroUsize {
        self.entries.cap()
    }

    /// Hit/miss counters since creation or the last [`clear`](Self::clear).
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drop all entries and reset counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }
}
