//! Cache Store Module
//!
//! Main cache engine: entries in insertion order, a logical clock, and
//! score-based eviction when capacity is reached.

use bytes::Bytes;
use tracing::debug;

use crate::cache::policy::select_victim;
use crate::cache::{CacheEntry, CacheSnapshot, CacheStats, EntrySummary, ScoreWeights};

// == Insert Outcome ==
/// What an insert did to the store.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    /// An entry for the URL existed and its payload was replaced
    Updated,
    /// A new entry was created, possibly after evicting another
    Created { evicted: Option<CacheEntry> },
}

// == Cache Store ==
/// Response cache keyed by URL with score-based eviction.
///
/// Callers share it behind a single lock; every method is one atomic
/// read-modify-write with respect to all others.
#[derive(Debug)]
pub struct CacheStore {
    /// Entries in insertion order, unique by URL
    entries: Vec<CacheEntry>,
    /// Logical clock, advanced once per hit, insert or update
    clock: u64,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Score coefficients
    weights: ScoreWeights,
    /// Activity counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, raised to 1 if zero
    /// * `weights` - Score coefficients for eviction
    pub fn new(capacity: usize, weights: ScoreWeights) -> Self {
        Self {
            entries: Vec::new(),
            clock: 0,
            capacity: capacity.max(1),
            weights,
            stats: CacheStats::new(),
        }
    }

    // == Lookup ==
    /// Finds the entry for `url` and records the hit.
    ///
    /// A hit advances the clock, bumps the frequency and rescores the entry
    /// against the ticks since its previous access. Returns a copy of the
    /// updated entry. A miss leaves the store untouched apart from stats.
    pub fn lookup(&mut self, url: &str) -> Option<CacheEntry> {
        let Some(entry) = self.entries.iter_mut().find(|e| e.url == url) else {
            self.stats.record_miss();
            return None;
        };

        self.clock += 1;
        entry.touch(self.clock, self.weights);
        self.stats.record_hit();

        debug!(url, clock = self.clock, score = entry.score, "cache hit");
        Some(entry.clone())
    }

    // == Insert ==
    /// Stores `payload` under `url`.
    ///
    /// The clock advances first. An existing entry gets the new payload and a
    /// zero recency term. Otherwise one entry is evicted if the store is full
    /// and a new entry is appended, scored with the raw clock value.
    pub fn insert(&mut self, url: impl Into<String>, payload: Bytes) -> InsertOutcome {
        let url = url.into();
        self.clock += 1;

        if let Some(entry) = self.entries.iter_mut().find(|e| e.url == url) {
            entry.replace_payload(payload, self.clock, self.weights);
            self.stats.record_update();
            debug!(url = %entry.url, clock = self.clock, score = entry.score, "cache entry updated");
            return InsertOutcome::Updated;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.evict()
        } else {
            None
        };

        let entry = CacheEntry::new(url, payload, self.clock, self.weights);
        debug!(url = %entry.url, clock = self.clock, score = entry.score, "cache entry created");
        self.entries.push(entry);
        self.stats.record_insertion();
        self.stats.set_total_entries(self.entries.len());

        InsertOutcome::Created { evicted }
    }

    // == Evict ==
    /// Removes and returns the lowest-scored entry.
    ///
    /// Ties go to the earliest inserted entry. Returns None if empty.
    pub fn evict(&mut self) -> Option<CacheEntry> {
        let idx = select_victim(&self.entries)?;
        let victim = self.entries.remove(idx);

        self.stats.record_eviction();
        self.stats.set_total_entries(self.entries.len());
        debug!(url = %victim.url, score = victim.score, "evicted cache entry");

        Some(victim)
    }

    // == Accessors ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current logical clock value.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns entry metadata in insertion order.
    pub fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            clock: self.clock,
            capacity: self.capacity,
            entries: self
                .entries
                .iter()
                .map(|e| EntrySummary::from_entry(e, self.clock))
                .collect(),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const HALF: ScoreWeights = ScoreWeights {
        frequency: 0.5,
        recency: 0.5,
    };

    fn payload(s: &'static str) -> Bytes {
        Bytes::from_static(s.as_bytes())
    }

    /// Store holding A, B, C inserted in that order at clocks 1, 2, 3.
    fn filled_store() -> CacheStore {
        let mut store = CacheStore::new(3, HALF);
        store.insert("A", payload("a"));
        store.insert("B", payload("b"));
        store.insert("C", payload("c"));
        store
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(3, HALF);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.clock(), 0);
        assert_eq!(store.capacity(), 3);
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut store = CacheStore::new(0, HALF);
        store.insert("A", payload("a"));
        store.insert("B", payload("b"));
        assert_eq!(store.capacity(), 1);
        assert_eq!(store.snapshot().urls(), vec!["B"]);
    }

    #[test]
    fn test_lookup_miss_leaves_state() {
        let mut store = filled_store();
        let before = store.clock();

        assert!(store.lookup("missing").is_none());
        assert_eq!(store.clock(), before);
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_insert_scores_by_raw_clock() {
        let store = filled_store();
        let snapshot = store.snapshot();

        assert_eq!(store.clock(), 3);
        assert_eq!(snapshot.get("A").unwrap().score, 1.0);
        assert_eq!(snapshot.get("B").unwrap().score, 1.5);
        assert_eq!(snapshot.get("C").unwrap().score, 2.0);
    }

    #[test]
    fn test_insert_over_capacity_evicts_lowest() {
        let mut store = filled_store();

        let outcome = store.insert("D", payload("d"));

        let InsertOutcome::Created { evicted: Some(victim) } = outcome else {
            panic!("expected an eviction, got {outcome:?}");
        };
        assert_eq!(victim.url, "A");
        assert_eq!(victim.score, 1.0);
        assert_eq!(store.clock(), 4);
        assert_eq!(store.len(), 3);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.urls(), vec!["B", "C", "D"]);
        assert_eq!(snapshot.get("D").unwrap().score, 2.5);
    }

    #[test]
    fn test_lookup_hit_rescores() {
        let mut store = filled_store();
        store.insert("D", payload("d"));

        let hit = store.lookup("B").unwrap();

        assert_eq!(store.clock(), 5);
        assert_eq!(hit.frequency, 2);
        assert_eq!(hit.last_access, 5);
        // 0.5 * 2 + 0.5 * (5 - 2)
        assert_eq!(hit.score, 2.5);
        assert_eq!(hit.payload, payload("b"));
    }

    #[test]
    fn test_insert_existing_updates_in_place() {
        let mut store = filled_store();

        let outcome = store.insert("B", payload("b2"));

        assert!(matches!(outcome, InsertOutcome::Updated));
        assert_eq!(store.len(), 3);
        assert_eq!(store.clock(), 4);

        let entry = store.lookup("B").unwrap();
        assert_eq!(entry.payload, payload("b2"));
        assert_eq!(entry.size, 2);
        assert_eq!(entry.frequency, 3);
    }

    #[test]
    fn test_update_recency_collapses_to_zero() {
        let mut store = filled_store();
        store.insert("A", payload("a2"));

        let snapshot = store.snapshot();
        let a = snapshot.get("A").unwrap();
        assert_eq!(a.frequency, 2);
        assert_eq!(a.last_access, 4);
        assert_eq!(a.score, 1.0);
    }

    #[test]
    fn test_update_keeps_insertion_position() {
        let mut store = filled_store();
        store.insert("A", payload("a2"));
        assert_eq!(store.snapshot().urls(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_hit_protects_from_eviction() {
        let mut store = filled_store();
        // A: freq 2, recency 4 - 1 = 3 -> 2.5
        store.lookup("A");

        let outcome = store.insert("D", payload("d"));
        let InsertOutcome::Created { evicted: Some(victim) } = outcome else {
            panic!("expected an eviction");
        };
        assert_eq!(victim.url, "B");
    }

    #[test]
    fn test_evict_tie_prefers_earliest_inserted() {
        let weights = ScoreWeights {
            frequency: 1.0,
            recency: 0.0,
        };
        let mut store = CacheStore::new(2, weights);
        store.insert("first", payload("1"));
        store.insert("second", payload("2"));

        let victim = store.evict().unwrap();
        assert_eq!(victim.url, "first");
        assert_eq!(store.snapshot().urls(), vec!["second"]);
    }

    #[test]
    fn test_evict_empty() {
        let mut store = CacheStore::new(3, HALF);
        assert!(store.evict().is_none());
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_stats() {
        let mut store = filled_store();
        store.lookup("A");
        store.lookup("nope");
        store.insert("A", payload("a2"));
        store.insert("D", payload("d"));

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.insertions, 4);
        assert_eq!(stats.updates, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.total_entries, 3);
    }
}
