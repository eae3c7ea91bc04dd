//! Search module
//!
//! Contains:
//! - Zobrist hashing for position identification
//! - Transposition table for caching search results
//! - Alpha-beta search with a cooperative deadline

pub mod alphabeta;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{order_moves, Deadline, SearchAborted, SearchStats, Searcher, INF};
pub use tt::{Bound, TTEntry, TTStats, TranspositionTable, TERMINAL_DEPTH};
pub use zobrist::{ZobristTable, ZOBRIST};
