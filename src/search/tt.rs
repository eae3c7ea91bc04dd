//! Transposition Table for caching search results
//!
//! The transposition table stores search results indexed by position hash,
//! enabling reuse of previous search results for positions we've seen before.
//! Stored scores are relative to the searcher's engine side, so one table must
//! only ever serve one perspective.
//!
//! # Example
//!
//! ```
//! use trinode::search::{Bound, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(1024);
//!
//! let hash = 0x1234_5678_9ABC_DEF0;
//! tt.store(hash, 3, 120, Bound::Exact);
//!
//! if let Some(entry) = tt.probe(hash) {
//!     assert_eq!(entry.score, 120);
//!     assert!(entry.depth >= 3);
//! }
//! ```

use crate::eval::Score;

/// Depth recorded for terminal positions: usable at any requested depth
pub const TERMINAL_DEPTH: u32 = u32::MAX;

/// How a stored score relates to the true value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Exact score - the search completed inside the window
    Exact,
    /// Lower bound - true score >= stored value (beta cutoff)
    Lower,
    /// Upper bound - true score <= stored value (alpha fail-low)
    Upper,
}

/// Transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Zobrist hash of the position
    pub hash: u64,
    /// Remaining search depth this result was computed for
    pub depth: u32,
    pub score: Score,
    pub bound: Bound,
}

/// Transposition table.
///
/// Direct-mapped: each hash maps to exactly one slot. Collisions are resolved
/// by a depth-preferred replacement policy.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    mask: usize,
}

impl TranspositionTable {
    /// Create a table with room for at least `min_entries` slots.
    ///
    /// The slot count is rounded up to a power of two (minimum 1024).
    #[must_use]
    pub fn new(min_entries: usize) -> Self {
        let size = min_entries.max(1024).next_power_of_two();
        Self {
            entries: vec![None; size],
            mask: size - 1,
        }
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    /// Entry stored for exactly this hash, if any.
    ///
    /// Callers decide whether the entry's depth and bound are usable.
    #[inline]
    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<TTEntry> {
        self.entries[self.index(hash)].filter(|e| e.hash == hash)
    }

    /// Store a search result.
    ///
    /// An entry is replaced if the slot is empty, holds the same position, or
    /// the new search is at least as deep as the existing entry.
    pub fn store(&mut self, hash: u64, depth: u32, score: Score, bound: Bound) {
        let idx = self.index(hash);

        let should_replace = match &self.entries[idx] {
            None => true,
            Some(e) => e.hash == hash || e.depth <= depth,
        };

        if should_replace {
            self.entries[idx] = Some(TTEntry {
                hash,
                depth,
                score,
                bound,
            });
        }
    }

    /// Clear all entries in the table.
    ///
    /// Called at the start of every game and whenever the perspective the
    /// scores are relative to changes.
    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    /// Occupied slots
    pub fn iter(&self) -> impl Iterator<Item = &TTEntry> + '_ {
        self.entries.iter().flatten()
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        let used = self.iter().count();
        TTStats {
            size: self.entries.len(),
            used,
            usage_percent: (used as f64 / self.entries.len() as f64 * 100.0) as u8,
        }
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy)]
pub struct TTStats {
    /// Total number of slots in the table
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
    /// Percentage of table in use (0-100)
    pub usage_percent: u8,
}
