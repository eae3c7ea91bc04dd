//! Evaluation module
//!
//! Static scoring of positions for the search:
//! - Center control and piece placement
//! - Two-in-line threats (ours and the opponent's)
//! - Fork potential
//! - Mobility

pub mod heuristic;
pub mod weights;

pub use heuristic::{evaluate, score_side, Evaluator};
pub use weights::{score_points, EvalWeights, Score, SCORE_SCALE, WIN_SCORE};
