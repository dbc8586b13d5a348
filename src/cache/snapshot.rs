//! Cache Snapshot Module
//!
//! Point-in-time view of the cache table, used for debug dumps.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::CacheEntry;

/// Metadata of one entry, without its payload.
#[derive(Debug, Clone, Serialize)]
pub struct EntrySummary {
    pub url: String,
    pub size: usize,
    pub last_access: u64,
    pub frequency: u64,
    pub score: f64,
    /// Ticks since last access at snapshot time
    pub age: u64,
    pub stored_at: DateTime<Utc>,
}

impl EntrySummary {
    pub fn from_entry(entry: &CacheEntry, clock: u64) -> Self {
        Self {
            url: entry.url.clone(),
            size: entry.size,
            last_access: entry.last_access,
            frequency: entry.frequency,
            score: entry.score,
            age: entry.age(clock),
            stored_at: entry.stored_at,
        }
    }
}

/// Cache contents at one logical instant, in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct CacheSnapshot {
    pub clock: u64,
    pub capacity: usize,
    pub entries: Vec<EntrySummary>,
}

impl CacheSnapshot {
    /// Returns the summary for `url`, if present.
    pub fn get(&self, url: &str) -> Option<&EntrySummary> {
        self.entries.iter().find(|e| e.url == url)
    }

    /// URLs in insertion order.
    pub fn urls(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.url.as_str()).collect()
    }
}
