//! Move generation and static move ranking
//!
//! A move slides one piece along an edge onto an empty node. Every generated
//! move carries a `rank`: a cheap heuristic computed on the simulated
//! occupancy, used only to order candidates before search.

use crate::board::{graph, GameState, Node, NodeSet, Side, CENTER};
use crate::error::{Error, Result};

/// Rank bonus for landing on the center
pub const RANK_CENTER: i32 = 3;
/// Rank bonus for landing next to the center
pub const RANK_NEAR_CENTER: i32 = 1;
/// Rank bonus for completing a win-line
pub const RANK_COMPLETES_LINE: i32 = 5;
/// Rank bonus for making two of a line with the third cell empty
pub const RANK_TWO_IN_LINE: i32 = 2;

/// A candidate move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub side: Side,
    pub piece_index: usize,
    pub from: Node,
    pub to: Node,
    /// Static ordering score (not a search value)
    pub rank: i32,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} -> {}", self.side, self.from, self.to)
    }
}

/// Empty neighbors of `node`
#[inline]
pub fn legal_targets(state: &GameState, node: Node) -> NodeSet {
    graph::neighbors(node).difference(state.occupied())
}

/// All legal moves for `side`, in piece-index then node order.
///
/// The turn is not checked: the search asks for either side's moves.
pub fn all_moves(state: &GameState, side: Side) -> Vec<Move> {
    let mut moves = Vec::with_capacity(12);
    for piece in state.pieces(side) {
        for to in legal_targets(state, piece.node) {
            moves.push(Move {
                side,
                piece_index: piece.index,
                from: piece.node,
                to,
                rank: rank_move(state, side, piece.node, to),
            });
        }
    }
    moves
}

/// Static rank of `side` moving `from -> to`, computed without mutating `state`.
pub fn rank_move(state: &GameState, side: Side, from: Node, to: Node) -> i32 {
    let mut mine = state.occupied_by(side);
    mine.clear(from);
    mine.set(to);
    let mut occupied = state.occupied();
    occupied.clear(from);
    occupied.set(to);

    let mut rank = 0;
    if to == CENTER {
        rank += RANK_CENTER;
    } else if graph::are_adjacent(to, CENTER) {
        rank += RANK_NEAR_CENTER;
    }

    let completes = graph::lines_through(to).any(|line| line.iter().all(|&n| mine.contains(n)));
    if completes {
        rank += RANK_COMPLETES_LINE;
    }

    let creates_two = graph::lines_through(to).any(|line| {
        let owned = line.iter().filter(|&&n| mine.contains(n)).count();
        let open = line.iter().filter(|&&n| !occupied.contains(n)).count();
        owned == 2 && open == 1
    });
    if creates_two {
        rank += RANK_TWO_IN_LINE;
    }

    rank
}

/// Position after `mv`, hash updated incrementally
#[inline]
#[must_use]
pub fn apply_move(state: &GameState, mv: &Move) -> GameState {
    state.apply(mv)
}

/// Check a move reported by an outside source against the current position.
///
/// Verifies the mover's turn, the piece's actual node and that the
/// destination is a legal target. Returns the ranked move on success.
pub fn validate_move(
    state: &GameState,
    side: Side,
    piece_index: usize,
    from: Node,
    to: Node,
) -> Result<Move> {
    if state.turn() != side {
        return Err(Error::WrongTurn {
            expected: state.turn(),
            got: side,
        });
    }
    let piece = state
        .piece(side, piece_index)
        .ok_or(Error::NoSuchPiece {
            side,
            index: piece_index,
        })?;
    if piece.node != from {
        return Err(Error::StaleOrigin {
            side,
            index: piece_index,
            claimed: from,
            actual: piece.node,
        });
    }
    if !legal_targets(state, from).contains(to) {
        return Err(Error::IllegalDestination { from, to });
    }
    Ok(Move {
        side,
        piece_index,
        from,
        to,
        rank: rank_move(state, side, from, to),
    })
}
