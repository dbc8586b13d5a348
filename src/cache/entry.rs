//! Cache Entry Module
//!
//! Defines a cached origin response and the three ways its score moves.

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::cache::ScoreWeights;

// == Cache Entry ==
/// A cached origin response with its access metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Request URL the response was fetched for
    pub url: String,
    /// Raw response bytes as received from the origin
    pub payload: Bytes,
    /// Length of `payload` in bytes
    pub size: usize,
    /// Logical clock value of the last creation, hit or update
    pub last_access: u64,
    /// Number of accesses, starting at 1 on creation
    pub frequency: u64,
    /// Eviction score, lowest is evicted first
    pub score: f64,
    /// Wall-clock time the payload was last written
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry at logical time `clock`.
    ///
    /// The raw clock value stands in for the recency term here, so later
    /// arrivals start with higher scores than earlier ones.
    pub fn new(url: String, payload: Bytes, clock: u64, weights: ScoreWeights) -> Self {
        Self {
            url,
            size: payload.len(),
            payload,
            last_access: clock,
            frequency: 1,
            score: weights.score(1, clock),
            stored_at: Utc::now(),
        }
    }

    // == Touch ==
    /// Records a cache hit at logical time `clock`.
    ///
    /// The recency term is the number of ticks since the previous access.
    pub fn touch(&mut self, clock: u64, weights: ScoreWeights) {
        let recency = clock.saturating_sub(self.last_access);
        self.frequency += 1;
        self.last_access = clock;
        self.score = weights.score(self.frequency, recency);
    }

    // == Replace Payload ==
    /// Overwrites the payload of an existing entry at logical time `clock`.
    ///
    /// `last_access` is moved to `clock` before the recency term is taken, so
    /// the recency contribution is always zero on this path.
    pub fn replace_payload(&mut self, payload: Bytes, clock: u64, weights: ScoreWeights) {
        self.size = payload.len();
        self.payload = payload;
        self.stored_at = Utc::now();
        self.frequency += 1;
        self.last_access = clock;
        let recency = clock - self.last_access;
        self.score = weights.score(self.frequency, recency);
    }

    // == Age ==
    /// Ticks elapsed since the last access, as seen at logical time `clock`.
    pub fn age(&self, clock: u64) -> u64 {
        clock.saturating_sub(self.last_access)
    }
}
