//! Cache Module
//!
//! Provides the in-memory response cache and its score-based eviction.

mod entry;
pub mod policy;
mod snapshot;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use policy::ScoreWeights;
pub use snapshot::{CacheSnapshot, EntrySummary};
pub use stats::CacheStats;
pub use store::{CacheStore, InsertOutcome};

// == Public Constants ==
/// Maximum allowed URL length in bytes for a cache key
pub const MAX_URL_LENGTH: usize = 999;
