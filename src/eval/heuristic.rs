//! Heuristic evaluation of positions
//!
//! The evaluation is a function of occupancy only; whose turn it is does not
//! matter. It rewards center control, two-in-line threats, fork potential and
//! mobility, and penalizes the opponent's two-in-line threats.

use crate::board::{graph, win_lines, GameState, NodeSet, Side, CENTER};
use crate::rules::legal_targets;

use super::weights::{EvalWeights, Score};

/// Positional evaluator with tunable weights
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    weights: EvalWeights,
}

impl Evaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    /// One-sided score of the position for `side`
    #[must_use]
    pub fn score_side(&self, state: &GameState, side: Side) -> Score {
        let w = &self.weights;
        let mine = state.occupied_by(side);
        let theirs = state.occupied_by(side.opponent());
        let empty = mine.union(theirs).complement();

        let mut sc = 0;

        if mine.contains(CENTER) {
            sc += w.center;
        }
        for node in mine {
            if graph::are_adjacent(node, CENTER) {
                sc += w.near_center;
            }
            if !node.is_center() {
                sc += w.perimeter;
            }
        }

        for &[a, x, b] in win_lines() {
            if mine.contains(a) && mine.contains(x) && mine.contains(b) {
                sc += w.full_line;
            } else if mine.contains(x)
                && ((mine.contains(a) && empty.contains(b)) || (mine.contains(b) && empty.contains(a)))
            {
                sc += w.two_in_line;
            }

            if theirs.contains(x)
                && ((theirs.contains(a) && !mine.contains(b))
                    || (theirs.contains(b) && !mine.contains(a)))
            {
                sc -= w.opponent_two_in_line;
            }
        }

        sc += w.fork * fork_nodes(mine, empty) as Score;

        let mobility: u32 = state
            .pieces(side)
            .map(|p| legal_targets(state, p.node).count())
            .sum();
        sc += w.mobility * Score::from(mobility);

        sc
    }

    /// Score for `engine_side` minus score for its opponent.
    #[must_use]
    pub fn evaluate(&self, state: &GameState, engine_side: Side) -> Score {
        self.score_side(state, engine_side) - self.score_side(state, engine_side.opponent())
    }
}

/// Empty nodes through which two or more lines have both other cells in `mine`
fn fork_nodes(mine: NodeSet, empty: NodeSet) -> usize {
    empty
        .iter()
        .filter(|&node| {
            let ready = graph::lines_through(node)
                .filter(|line| {
                    line.iter()
                        .filter(|&&n| n != node)
                        .all(|&n| mine.contains(n))
                })
                .count();
            ready >= 2
        })
        .count()
}

/// One-sided score with default weights
#[must_use]
pub fn score_side(state: &GameState, side: Side) -> Score {
    Evaluator::default().score_side(state, side)
}

/// Evaluate the position for `engine_side` with default weights.
///
/// Positive values favour `engine_side`.
#[must_use]
pub fn evaluate(state: &GameState, engine_side: Side) -> Score {
    Evaluator::default().evaluate(state, engine_side)
}
