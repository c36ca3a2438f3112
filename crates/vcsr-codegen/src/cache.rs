//! # Generation Cache
//!
//! Generated code keyed by `<source identifier>-<language id>`. Bounded by
//! an LRU capacity; entries also expire after a TTL, checked when read.
//! Concurrent identical misses may both generate, and the second insert wins.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;

use crate::generator::GeneratedCode;
use crate::language::Language;

/// Build the cache key for a source and language.
pub fn cache_key(source_id: &str, language: Language) -> String {
    format!("{source_id}-{}", language.id())
}

#[derive(Debug)]
struct Entry {
    value: GeneratedCode,
    inserted_at: Instant,
}

/// Shared, cloneable cache handle.
#[derive(Debug, Clone)]
pub struct GenerationCache {
    inner: Arc<Mutex<LruCache<String, Entry>>>,
    ttl: Duration,
}

impl GenerationCache {
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Arc::new(Mutex::new(LruCache::new(capacity))),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// A live entry, or `None`. Expired entries are dropped on read.
    pub fn get(&self, key: &str) -> Option<GeneratedCode> {
        let mut cache = self.inner.lock();
        let expired = match cache.get(key) {
            None => return None,
            Some(entry) => entry.inserted_at.elapsed() >= self.ttl,
        };
        if expired {
            cache.pop(key);
            tracing::debug!(key, "cache entry expired");
            return None;
        }
        cache.get(key).map(|entry| entry.value.clone())
    }

    pub fn insert(&self, key: impl Into<String>, value: GeneratedCode) {
        self.inner.lock().put(
            key.into(),
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Remove an entry. Returns whether one was present.
    pub fn remove(&self, key: &str) -> bool {
        self.inner.lock().pop(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
