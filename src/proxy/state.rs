//! Shared proxy state.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::Mutex;

use crate::cache::{CacheEntry, CacheSnapshot, CacheStats, CacheStore, InsertOutcome};
use crate::config::Config;

/// State shared by every connection task.
///
/// Wraps the cache store in one `Arc<Mutex<>>`. Each method takes the lock
/// for a single store operation and releases it before returning, so no
/// caller can hold it across socket I/O.
#[derive(Clone)]
pub struct ProxyState {
    cache: Arc<Mutex<CacheStore>>,
    buffer_size: usize,
}

impl ProxyState {
    /// Creates a new ProxyState around the given cache store.
    pub fn new(cache: CacheStore, buffer_size: usize) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
            buffer_size,
        }
    }

    /// Creates a new ProxyState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let cache = CacheStore::new(config.cache_capacity, config.weights);
        Self::new(cache, config.buffer_size)
    }

    /// Byte limit for one request or response read.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub async fn lookup(&self, url: &str) -> Option<CacheEntry> {
        self.cache.lock().await.lookup(url)
    }

    pub async fn insert(&self, url: &str, payload: Bytes) -> InsertOutcome {
        self.cache.lock().await.insert(url, payload)
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.lock().await.stats()
    }

    pub async fn snapshot(&self) -> CacheSnapshot {
        self.cache.lock().await.snapshot()
    }
}
