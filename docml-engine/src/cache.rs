//! Read-through parse cache keyed by exact source text.
//!
//! A memoization table in front of [`parse_document`]. Both successful
//! documents and markup errors are memoized, together with the navigation
//! entries derived from the document, so each distinct source string is parsed
//! and scanned once. Unbounded unless a capacity is configured, in which case
//! the least recently used entry is evicted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::MarkupError;
use crate::nav::extract_navigation;
use crate::parse::{ParseOptions, parse_document};
use crate::types::{Document, NavEntry};

/// Engine-level configuration shared by the cache and the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    #[serde(default)]
    pub parse: ParseOptions,
    /// Maximum number of distinct sources kept; `None` keeps everything.
    /// A capacity of 0 is treated as 1.
    #[serde(default)]
    pub cache_capacity: Option<usize>,
}

/// Counters describing cache effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    /// Equal to the number of times the underlying parser ran.
    pub misses: u64,
    pub evictions: u64,
}

#[derive(Clone)]
struct Entry {
    parsed: Result<Arc<Document>, MarkupError>,
    navigation: Arc<[NavEntry]>,
}

/// LRU bookkeeping. Same shape as a plain `HashMap` + recency list; the list
/// is only maintained when a capacity is set.
struct Slots {
    capacity: Option<usize>,
    items: HashMap<String, Entry>,
    order: Vec<String>,
}

impl Slots {
    fn get(&mut self, key: &str) -> Option<Entry> {
        let entry = self.items.get(key)?.clone();
        if self.capacity.is_some() {
            self.order.retain(|k| k != key);
            self.order.push(key.to_string());
        }
        Some(entry)
    }

    /// Insert, returning how many entries were evicted to make room.
    fn insert(&mut self, key: String, entry: Entry) -> u64 {
        let Some(capacity) = self.capacity else {
            self.items.insert(key, entry);
            return 0;
        };

        let mut evicted = 0;
        if !self.items.contains_key(&key) {
            while self.items.len() >= capacity.max(1) && !self.order.is_empty() {
                let oldest = self.order.remove(0);
                self.items.remove(&oldest);
                evicted += 1;
            }
        }
        self.order.retain(|k| k != &key);
        self.order.push(key.clone());
        self.items.insert(key, entry);
        evicted
    }

    fn remove(&mut self, key: &str) -> bool {
        self.order.retain(|k| k != key);
        self.items.remove(key).is_some()
    }
}

/// Thread-safe memo of parsed documents.
pub struct DocumentCache {
    options: ParseOptions,
    slots: Mutex<Slots>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl DocumentCache {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            options: config.parse,
            slots: Mutex::new(Slots {
                capacity: config.cache_capacity,
                items: HashMap::new(),
                order: Vec::new(),
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(EngineConfig::default())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(EngineConfig {
            cache_capacity: Some(capacity),
            ..EngineConfig::default()
        })
    }

    /// Parse `source`, reusing the memoized result for identical text.
    pub fn parse(&self, source: &str) -> Result<Arc<Document>, MarkupError> {
        self.entry(source).parsed
    }

    /// Navigation entries for `source`; empty when it does not parse.
    pub fn navigation(&self, source: &str) -> Vec<NavEntry> {
        self.entry(source).navigation.to_vec()
    }

    /// Drop the entry for `source`. Returns whether one existed.
    pub fn invalidate(&self, source: &str) -> bool {
        self.lock().remove(source)
    }

    pub fn clear(&self) {
        let mut slots = self.lock();
        slots.items.clear();
        slots.order.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    fn entry(&self, source: &str) -> Entry {
        if let Some(entry) = self.lock().get(source) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::debug!("parse cache hit ({} bytes)", source.len());
            return entry;
        }

        // Parse outside the lock. Two threads racing on the same key both
        // parse and the second insert overwrites an identical entry.
        self.misses.fetch_add(1, Ordering::Relaxed);
        log::debug!("parse cache miss ({} bytes)", source.len());
        let parsed = parse_document(source, &self.options).map(Arc::new);
        let navigation: Arc<[NavEntry]> = match &parsed {
            Ok(doc) => extract_navigation(doc).into(),
            Err(_) => Arc::from(Vec::new()),
        };
        let entry = Entry { parsed, navigation };

        let evicted = self.lock().insert(source.to_string(), entry.clone());
        if evicted > 0 {
            self.evictions.fetch_add(evicted, Ordering::Relaxed);
            log::debug!("parse cache evicted {evicted} entries");
        }
        entry
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Slots> {
        // Slots hold no invariants a panicking thread could break halfway.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DocumentCache {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn second_parse_is_a_hit() {
        let cache = DocumentCache::unbounded();
        let a = cache.parse("<p>hello</p>").unwrap();
        let b = cache.parse("<p>hello</p>").unwrap();
        assert!(Arc::ptr_eq(&a, &b), "identical source should reuse the document");
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                evictions: 0
            }
        );
    }

    #[test]
    fn keys_are_exact_source_text() {
        let cache = DocumentCache::unbounded();
        cache.parse("<p>a</p>").unwrap();
        cache.parse("<p>a</p> ").unwrap();
        assert_eq!(cache.stats().misses, 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn errors_are_memoized() {
        let cache = DocumentCache::unbounded();
        let first = cache.parse("<p>").unwrap_err();
        let second = cache.parse("<p>").unwrap_err();
        assert_eq!(first, second);
        assert_eq!(cache.stats().misses, 1);
        assert!(cache.navigation("<p>").is_empty());
    }

    #[test]
    fn navigation_is_cached_with_the_document() {
        let cache = DocumentCache::unbounded();
        let src = r#"<section id="a" title="A"/>"#;
        let nav = cache.navigation(src);
        assert_eq!(nav.len(), 1);
        cache.parse(src).unwrap();
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn capacity_evicts_least_recently_used() {
        let cache = DocumentCache::with_capacity(2);
        cache.parse("<p>1</p>").unwrap();
        cache.parse("<p>2</p>").unwrap();
        // Touch 1 so that 2 becomes the eviction candidate.
        cache.parse("<p>1</p>").unwrap();
        cache.parse("<p>3</p>").unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 1);

        cache.parse("<p>1</p>").unwrap();
        assert_eq!(cache.stats().misses, 3, "1 should still be cached");
        cache.parse("<p>2</p>").unwrap();
        assert_eq!(cache.stats().misses, 4, "2 should have been evicted");
    }

    #[test]
    fn zero_capacity_keeps_one_entry() {
        let cache = DocumentCache::with_capacity(0);
        cache.parse("<p>1</p>").unwrap();
        cache.parse("<p>1</p>").unwrap();
        cache.parse("<p>2</p>").unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn invalidate_forces_a_reparse() {
        let cache = DocumentCache::unbounded();
        cache.parse("<p>x</p>").unwrap();
        assert!(cache.invalidate("<p>x</p>"));
        assert!(!cache.invalidate("<p>x</p>"));
        cache.parse("<p>x</p>").unwrap();
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = DocumentCache::unbounded();
        cache.parse("<p>x</p>").unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn parse_options_are_applied() {
        let cache = DocumentCache::new(EngineConfig {
            parse: ParseOptions { max_depth: 1 },
            cache_capacity: None,
        });
        assert!(cache.parse("<a/>").is_ok());
        assert!(matches!(
            cache.parse("<a><b/></a>"),
            Err(MarkupError::TooDeep { limit: 1, .. })
        ));
    }
}
