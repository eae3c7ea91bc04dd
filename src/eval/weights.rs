//! Evaluation weights
//!
//! Scores are integers in tenths of a point so that every evaluation term is
//! exact and can be stored in the transposition table as-is.

use serde::{Deserialize, Serialize};

/// Evaluation score in tenths of a point
pub type Score = i64;

/// Score units per point
pub const SCORE_SCALE: Score = 10;

/// Terminal score for a completed win-line (1000 points)
pub const WIN_SCORE: Score = 1000 * SCORE_SCALE;

/// Convert a score to points
#[inline]
pub fn score_points(score: Score) -> f64 {
    score as f64 / SCORE_SCALE as f64
}

/// Tunable weights of the positional evaluator, in tenths of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Holding the center node
    pub center: Score,
    /// Per piece adjacent to the center
    pub near_center: Score,
    /// Per piece on a perimeter node
    pub perimeter: Score,
    /// Holding all three nodes of a line
    pub full_line: Score,
    /// Center plus one outer node, other outer node empty
    pub two_in_line: Score,
    /// Penalty when the opponent holds center plus one outer node
    pub opponent_two_in_line: Score,
    /// Per empty node that would complete two lines at once
    pub fork: Score,
    /// Per legal destination
    pub mobility: Score,
}

impl EvalWeights {
    pub const DEFAULT: EvalWeights = EvalWeights {
        center: 20,
        near_center: 10,
        perimeter: 5,
        full_line: 60,
        two_in_line: 20,
        opponent_two_in_line: 20,
        fork: 40,
        mobility: 2,
    };
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}
