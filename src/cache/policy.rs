//! Eviction Policy Module
//!
//! Score computation and victim selection. Selection is a pure function over
//! the store's entries; the store decides when to call it.

use serde::Serialize;

use crate::cache::CacheEntry;

// == Score Weights ==
/// Coefficients blending access count and recency into one score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreWeights {
    /// Weight of the access count
    pub frequency: f64,
    /// Weight of the recency term
    pub recency: f64,
}

impl ScoreWeights {
    /// Computes `frequency_weight * frequency + recency_weight * recency`.
    pub fn score(&self, frequency: u64, recency: u64) -> f64 {
        self.frequency * frequency as f64 + self.recency * recency as f64
    }
}

// == Select Victim ==
/// Returns the index of the entry with the lowest score.
///
/// Entries are expected in insertion order. On a tie the earliest entry wins,
/// since only a strictly lower score replaces the current candidate.
/// Returns None if `entries` is empty.
pub fn select_victim(entries: &[CacheEntry]) -> Option<usize> {
    let mut victim: Option<(usize, f64)> = None;

    for (idx, entry) in entries.iter().enumerate() {
        match victim {
            Some((_, lowest)) if entry.score >= lowest => {}
            _ => victim = Some((idx, entry.score)),
        }
    }

    victim.map(|(idx, _)| idx)
}
