use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default freshness window of cached payloads.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    captured_at: Instant,
}

/// Map from cache key to a payload and the instant it was stored.
/// An entry counts as a hit only while it is younger than `ttl`; stale entries stay until overwritten.
#[derive(Debug, Clone)]
pub struct TtlCache<V> {
    pub ttl: Duration,
    entries: HashMap<String, CacheEntry<V>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        self.entries
            .get(key)
            .filter(|entry| now.saturating_duration_since(entry.captured_at) < self.ttl)
            .map(|entry| entry.value.clone())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        self.insert_at(key, value, Instant::now())
    }

    pub fn insert_at(&mut self, key: impl Into<String>, value: V, captured_at: Instant) {
        self.entries.insert(key.into(), CacheEntry { value, captured_at });
    }

    /// Number of stored entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

// MARK: Keys

pub fn listing_key(tag: &str, date: Option<&str>) -> String {
    format!("news-{}-{}", tag, date.unwrap_or("latest"))
}

pub fn search_key(query: &str, tags: &[String], limit: usize) -> String {
    format!("search-{}-{}-{}", query.to_lowercase(), tags.join(","), limit)
}
