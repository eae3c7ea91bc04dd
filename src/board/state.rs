//! Game position with incremental hash

use super::{Node, NodeSet, Side, PIECES_PER_SIDE};
use crate::error::{Error, Result};
use crate::rules::Move;
use crate::search::ZOBRIST;

/// Starting placement of the first player
pub const START_FIRST: [Node; PIECES_PER_SIDE] = [Node::B, Node::C, Node::D];
/// Starting placement of the second player
pub const START_SECOND: [Node; PIECES_PER_SIDE] = [Node::H, Node::G, Node::F];

/// A piece as seen by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub index: usize,
    pub node: Node,
}

/// Game position.
///
/// Small enough to be `Copy`; snapshots are plain copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    turn: Side,
    /// Piece nodes, indexed by `[side][piece_index]`
    pieces: [[Node; PIECES_PER_SIDE]; 2],
    hash: u64,
}

impl GameState {
    /// The fixed starting position, first player to move
    pub fn new() -> Self {
        Self::build(Side::First, START_FIRST, START_SECOND)
    }

    /// Build an arbitrary position. Fails if two pieces share a node.
    pub fn from_placement(
        turn: Side,
        first: [Node; PIECES_PER_SIDE],
        second: [Node; PIECES_PER_SIDE],
    ) -> Result<Self> {
        let mut seen = NodeSet::new();
        for node in first.into_iter().chain(second) {
            if seen.contains(node) {
                return Err(Error::DuplicateOccupancy { node });
            }
            seen.set(node);
        }
        Ok(Self::build(turn, first, second))
    }

    fn build(turn: Side, first: [Node; PIECES_PER_SIDE], second: [Node; PIECES_PER_SIDE]) -> Self {
        Self {
            turn,
            pieces: [first, second],
            hash: ZOBRIST.hash_parts(turn, first, second),
        }
    }

    /// Side to move
    #[inline]
    pub fn turn(&self) -> Side {
        self.turn
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Piece nodes of a side in index order
    #[inline]
    pub fn positions(&self, side: Side) -> [Node; PIECES_PER_SIDE] {
        self.pieces[side.to_index()]
    }

    pub fn piece(&self, side: Side, index: usize) -> Option<Piece> {
        self.pieces[side.to_index()]
            .get(index)
            .map(|&node| Piece { side, index, node })
    }

    pub fn pieces(&self, side: Side) -> impl Iterator<Item = Piece> + '_ {
        self.pieces[side.to_index()]
            .iter()
            .enumerate()
            .map(move |(index, &node)| Piece { side, index, node })
    }

    /// Side occupying a node
    #[inline]
    pub fn occupant(&self, node: Node) -> Option<Side> {
        Side::BOTH
            .into_iter()
            .find(|side| self.pieces[side.to_index()].contains(&node))
    }

    #[inline]
    pub fn is_empty(&self, node: Node) -> bool {
        self.occupant(node).is_none()
    }

    /// Nodes held by one side
    #[inline]
    pub fn occupied_by(&self, side: Side) -> NodeSet {
        NodeSet::from_nodes(&self.pieces[side.to_index()])
    }

    /// Nodes held by either side
    #[inline]
    pub fn occupied(&self) -> NodeSet {
        self.occupied_by(Side::First).union(self.occupied_by(Side::Second))
    }

    /// Return the position after `mv`. The hash is updated incrementally.
    ///
    /// `mv` must come from `all_moves` or `validate_move`; legality is only
    /// checked in debug builds.
    #[must_use]
    pub fn apply(&self, mv: &Move) -> GameState {
        debug_assert_eq!(self.pieces[mv.side.to_index()][mv.piece_index], mv.from);
        debug_assert!(self.is_empty(mv.to), "{} is occupied", mv.to);

        let mut next = *self;
        next.pieces[mv.side.to_index()][mv.piece_index] = mv.to;
        next.turn = self.turn.opponent();
        next.hash = ZOBRIST.update_move(self.hash, mv.side, mv.from, mv.to);

        next.debug_check();
        next
    }

    /// Assert the position invariants (debug builds only)
    #[inline]
    pub fn debug_check(&self) {
        debug_assert_eq!(self.occupied().count() as usize, 2 * PIECES_PER_SIDE);
        debug_assert_eq!(self.hash, ZOBRIST.hash(self), "incremental hash drifted");
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
