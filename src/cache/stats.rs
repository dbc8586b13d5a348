//! Cache Statistics Module
//!
//! Tracks cache activity: hits, misses, insertions, updates and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Counters describing cache activity since startup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups that found an entry
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Inserts that created a new entry
    pub insertions: u64,
    /// Inserts that overwrote an existing entry
    pub updates: u64,
    /// Entries removed by the eviction policy
    pub evictions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hits counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the misses counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Insertion ==
    /// Increments the insertion counter.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    // == Record Update ==
    /// Increments the update counter.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
