//! Zobrist hashing for position identification
//!
//! Zobrist hashing allows O(1) incremental hash updates when a piece slides
//! from one node to another. Every `GameState` carries its hash, which is the
//! key for transposition table lookups during search.
//!
//! # Example
//!
//! ```
//! use trinode::board::{GameState, Node, Side};
//! use trinode::search::ZOBRIST;
//!
//! let start = GameState::new();
//! let h0 = ZOBRIST.hash(&start);
//!
//! // Incremental update is equivalent to full recomputation
//! let h1 = ZOBRIST.update_move(h0, Side::First, Node::C, Node::X);
//! let next = GameState::from_placement(
//!     Side::Second,
//!     [Node::B, Node::X, Node::D],
//!     [Node::H, Node::G, Node::F],
//! )
//! .unwrap();
//! assert_eq!(h1, ZOBRIST.hash(&next));
//! ```

use once_cell::sync::Lazy;
use rand::RngCore;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::board::{GameState, Node, Side, NODE_COUNT};

/// Fixed seed so that every peer derives the same keys and can compare hashes.
const ZOBRIST_SEED: u64 = 0x1234_5678_9ABC_DEF0;

/// Process-wide key table. Immutable after first use.
pub static ZOBRIST: Lazy<ZobristTable> = Lazy::new(ZobristTable::new);

/// Zobrist key table.
///
/// One random value per (side, node) occupancy plus one value that is XORed
/// in when the second player is to move.
pub struct ZobristTable {
    pieces: [[u64; NODE_COUNT]; 2],
    second_to_move: u64,
}

impl ZobristTable {
    /// Create a table with deterministic random values.
    #[must_use]
    pub fn new() -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(ZOBRIST_SEED);

        let mut pieces = [[0u64; NODE_COUNT]; 2];
        for side in &mut pieces {
            for key in side.iter_mut() {
                *key = rng.next_u64();
            }
        }

        Self {
            pieces,
            second_to_move: rng.next_u64(),
        }
    }

    #[inline]
    #[must_use]
    pub fn piece_key(&self, side: Side, node: Node) -> u64 {
        self.pieces[side.to_index()][node.to_index()]
    }

    #[inline]
    #[must_use]
    pub fn turn_key(&self) -> u64 {
        self.second_to_move
    }

    /// Compute the full hash of a position from scratch.
    ///
    /// For updates during play and search use `update_move`.
    #[must_use]
    pub fn hash(&self, state: &GameState) -> u64 {
        self.hash_parts(state.turn(), state.positions(Side::First), state.positions(Side::Second))
    }

    /// Full hash from raw placements.
    #[must_use]
    pub fn hash_parts(&self, turn: Side, first: [Node; 3], second: [Node; 3]) -> u64 {
        let mut h = 0u64;
        for node in first {
            h ^= self.piece_key(Side::First, node);
        }
        for node in second {
            h ^= self.piece_key(Side::Second, node);
        }
        if turn == Side::Second {
            h ^= self.second_to_move;
        }
        h
    }

    /// Incrementally update a hash for `side` moving a piece `from -> to`.
    ///
    /// Also toggles the side-to-move component.
    #[inline]
    #[must_use]
    pub fn update_move(&self, hash: u64, side: Side, from: Node, to: Node) -> u64 {
        hash ^ self.piece_key(side, from) ^ self.piece_key(side, to) ^ self.second_to_move
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zobrist_deterministic() {
        let zt1 = ZobristTable::new();
        let zt2 = ZobristTable::new();
        let state = GameState::new();
        assert_eq!(zt1.hash(&state), zt2.hash(&state));
        assert_eq!(zt1.hash(&state), ZOBRIST.hash(&state));
    }

    #[test]
    fn test_zobrist_turn_bit() {
        let first = [Node::B, Node::C, Node::D];
        let second = [Node::H, Node::G, Node::F];
        let a = ZOBRIST.hash_parts(Side::First, first, second);
        let b = ZOBRIST.hash_parts(Side::Second, first, second);
        assert_eq!(a ^ b, ZOBRIST.turn_key());
    }

    #[test]
    fn test_zobrist_keys_distinct() {
        let mut keys: Vec<u64> = Vec::new();
        for side in Side::BOTH {
            for node in Node::ALL {
                keys.push(ZOBRIST.piece_key(side, node));
            }
        }
        keys.push(ZOBRIST.turn_key());
        let len = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), len);
    }

    #[test]
    fn test_zobrist_piece_order_irrelevant() {
        let second = [Node::H, Node::G, Node::F];
        let a = ZOBRIST.hash_parts(Side::First, [Node::B, Node::C, Node::D], second);
        let b = ZOBRIST.hash_parts(Side::First, [Node::D, Node::B, Node::C], second);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zobrist_move_and_back() {
        let h0 = ZOBRIST.hash(&GameState::new());
        let h1 = ZOBRIST.update_move(h0, Side::First, Node::C, Node::X);
        assert_ne!(h0, h1);
        // Sliding back restores occupancy but the turn bit has toggled twice
        let h2 = ZOBRIST.update_move(h1, Side::First, Node::X, Node::C);
        assert_eq!(h2, h0);
    }

    #[test]
    fn test_zobrist_sides_differ() {
        let a = ZOBRIST.hash_parts(
            Side::First,
            [Node::A, Node::X, Node::E],
            [Node::H, Node::G, Node::F],
        );
        let b = ZOBRIST.hash_parts(
            Side::First,
            [Node::H, Node::G, Node::F],
            [Node::A, Node::X, Node::E],
        );
        assert_ne!(a, b);
    }
}
