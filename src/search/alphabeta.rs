//! Alpha-Beta search with transposition table and deadline
//!
//! This module implements the core search algorithm. It is a minimax search
//! with alpha-beta pruning: `maximizing` nodes pick moves for the engine side,
//! minimizing nodes pick moves for its opponent, and every score is relative
//! to the engine side.
//!
//! # Features
//!
//! - Transposition table probing with depth-gated bound tightening
//! - Static-rank move ordering
//! - Cooperative cancellation: every call checks the deadline first and
//!   aborts the whole search with `Err(SearchAborted)`
//!
//! # Example
//!
//! ```
//! use trinode::board::{GameState, Side};
//! use trinode::search::{Deadline, Searcher, INF};
//!
//! let mut searcher = Searcher::new(1 << 12);
//! searcher.set_engine_side(Side::First);
//!
//! let state = GameState::new();
//! let score = searcher
//!     .search(&state, 4, -INF, INF, true, Deadline::none())
//!     .unwrap();
//! println!("score at depth 4: {score}");
//! ```

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::board::{GameState, Side};
use crate::config::EngineConfig;
use crate::eval::{Evaluator, Score, WIN_SCORE};
use crate::rules::{all_moves, check_win, Move};

use super::tt::{Bound, TTStats, TranspositionTable, TERMINAL_DEPTH};

/// Infinity score for alpha-beta bounds
pub const INF: Score = 2 * WIN_SCORE;

/// The deadline passed while a search was in progress.
///
/// Nothing computed by the aborted call is kept.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("search deadline exceeded")]
pub struct SearchAborted;

/// Wall-clock limit for a search. `Deadline::none()` never expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    pub const fn none() -> Self {
        Self(None)
    }

    pub const fn at(instant: Instant) -> Self {
        Self(Some(instant))
    }

    pub fn after(budget: Duration) -> Self {
        Self(Some(Instant::now() + budget))
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.0.is_some_and(|t| Instant::now() >= t)
    }
}

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search calls that passed the deadline check
    pub nodes: u64,
    /// Total TT probes
    pub tt_probes: u64,
    /// TT probes whose entry was deep enough to use
    pub tt_hits: u64,
    /// Total beta cutoffs
    pub beta_cutoffs: u64,
}

impl SearchStats {
    /// TT hit rate in percent
    pub fn tt_hit_rate(&self) -> f64 {
        if self.tt_probes == 0 {
            0.0
        } else {
            self.tt_hits as f64 / self.tt_probes as f64 * 100.0
        }
    }
}

/// Sort moves by descending static rank. Stable, so ties keep generation order.
#[inline]
pub fn order_moves(moves: &mut [Move]) {
    moves.sort_by(|a, b| b.rank.cmp(&a.rank));
}

/// Alpha-beta searcher owning one transposition table.
///
/// The table holds scores relative to `engine_side`; changing the engine side
/// clears it.
pub struct Searcher {
    tt: TranspositionTable,
    evaluator: Evaluator,
    engine_side: Side,
    use_tt: bool,
    stats: SearchStats,
}

impl Searcher {
    /// Create a searcher with default evaluation weights.
    #[must_use]
    pub fn new(tt_entries: usize) -> Self {
        Self {
            tt: TranspositionTable::new(tt_entries),
            evaluator: Evaluator::default(),
            engine_side: Side::Second,
            use_tt: true,
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            tt: TranspositionTable::new(config.tt_entries),
            evaluator: Evaluator::new(config.weights),
            engine_side: Side::Second,
            use_tt: config.use_tt,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn engine_side(&self) -> Side {
        self.engine_side
    }

    /// Set the side scores are relative to. Clears the table when it changes.
    pub fn set_engine_side(&mut self, side: Side) {
        if side != self.engine_side {
            self.tt.clear();
            self.engine_side = side;
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }

    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    #[inline]
    fn store(&mut self, hash: u64, depth: u32, score: Score, bound: Bound) {
        if self.use_tt {
            self.tt.store(hash, depth, score, bound);
        }
    }

    /// Minimax value of `state` searched `depth` plies deep.
    ///
    /// `maximizing` is true when the engine side is to move. Returns
    /// `Err(SearchAborted)` as soon as the deadline has passed; table entries
    /// are only written by calls that complete.
    pub fn search(
        &mut self,
        state: &GameState,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
        deadline: Deadline,
    ) -> Result<Score, SearchAborted> {
        if deadline.expired() {
            return Err(SearchAborted);
        }
        self.stats.nodes += 1;

        let (alpha_orig, beta_orig) = (alpha, beta);
        let hash = state.hash();

        // TT probe
        if self.use_tt {
            self.stats.tt_probes += 1;
            if let Some(entry) = self.tt.probe(hash) {
                if entry.depth >= depth {
                    self.stats.tt_hits += 1;
                    match entry.bound {
                        Bound::Exact => return Ok(entry.score),
                        Bound::Lower => alpha = alpha.max(entry.score),
                        Bound::Upper => beta = beta.min(entry.score),
                    }
                    if alpha >= beta {
                        return Ok(entry.score);
                    }
                }
            }
        }

        // Terminal values do not depend on depth
        if let Some(win) = check_win(state) {
            let score = if win.side == self.engine_side {
                WIN_SCORE
            } else {
                -WIN_SCORE
            };
            self.store(hash, TERMINAL_DEPTH, score, Bound::Exact);
            return Ok(score);
        }

        if depth == 0 {
            let score = self.evaluator.evaluate(state, self.engine_side);
            self.store(hash, 0, score, Bound::Exact);
            return Ok(score);
        }

        let mover = if maximizing {
            self.engine_side
        } else {
            self.engine_side.opponent()
        };
        debug_assert_eq!(mover, state.turn(), "maximizing flag out of step with turn");

        let mut moves = all_moves(state, mover);
        if moves.is_empty() {
            // Dead end: nothing to expand
            let score = self.evaluator.evaluate(state, self.engine_side);
            self.store(hash, depth, score, Bound::Exact);
            return Ok(score);
        }
        order_moves(&mut moves);

        let mut best = if maximizing { -INF } else { INF };
        for mv in &moves {
            let child = state.apply(mv);
            let value = self.search(&child, depth - 1, alpha, beta, !maximizing, deadline)?;

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }
            if beta <= alpha {
                self.stats.beta_cutoffs += 1;
                break;
            }
        }

        let bound = if best <= alpha_orig {
            Bound::Upper
        } else if best >= beta_orig {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.store(hash, depth, best, bound);

        Ok(best)
    }

    /// Best of `moves` for the engine side at `depth` (children searched at
    /// `depth - 1`).
    ///
    /// Later moves are searched with alpha raised to the best score so far;
    /// their scores may then be bounds, but the chosen move and score are
    /// exact. Ties keep the earlier move. Returns `Ok(None)` for an empty list.
    pub fn search_root(
        &mut self,
        state: &GameState,
        moves: &[Move],
        depth: u32,
        deadline: Deadline,
    ) -> Result<Option<(Move, Score)>, SearchAborted> {
        let mut best: Option<(Move, Score)> = None;
        for mv in moves {
            let alpha = best.map_or(-INF, |(_, s)| s);
            let child = state.apply(mv);
            let score = self.search(&child, depth.saturating_sub(1), alpha, INF, false, deadline)?;
            match best {
                Some((_, s)) if score <= s => {}
                _ => best = Some((*mv, score)),
            }
        }
        Ok(best)
    }

    /// Exact engine-side value of every move in `moves`, each searched with a
    /// full window at `depth - 1`.
    pub fn score_moves(
        &mut self,
        state: &GameState,
        moves: &[Move],
        depth: u32,
        deadline: Deadline,
    ) -> Result<Vec<Score>, SearchAborted> {
        moves
            .iter()
            .map(|mv| {
                let child = state.apply(mv);
                self.search(&child, depth.saturating_sub(1), -INF, INF, false, deadline)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Node;
    use crate::eval::evaluate;

    fn searcher_for(side: Side) -> Searcher {
        let mut s = Searcher::new(1 << 12);
        s.set_engine_side(side);
        s
    }

    #[test]
    fn test_depth_zero_is_evaluate() {
        let state = GameState::new();
        let mut s = searcher_for(Side::First);
        let score = s.search(&state, 0, -INF, INF, true, Deadline::none()).unwrap();
        assert_eq!(score, evaluate(&state, Side::First));
    }

    #[test]
    fn test_terminal_score() {
        let won = GameState::from_placement(
            Side::Second,
            [Node::A, Node::X, Node::E],
            [Node::H, Node::G, Node::F],
        )
        .unwrap();

        let mut s = searcher_for(Side::First);
        assert_eq!(s.search(&won, 3, -INF, INF, false, Deadline::none()), Ok(WIN_SCORE));

        let mut s = searcher_for(Side::Second);
        assert_eq!(s.search(&won, 3, -INF, INF, true, Deadline::none()), Ok(-WIN_SCORE));

        let entry = s.tt().probe(won.hash()).unwrap();
        assert_eq!(entry.depth, TERMINAL_DEPTH);
        assert_eq!(entry.bound, Bound::Exact);
    }

    #[test]
    fn test_finds_win_in_one() {
        // First holds A and X; D -> E completes A-X-E
        let state = GameState::from_placement(
            Side::First,
            [Node::A, Node::X, Node::D],
            [Node::H, Node::G, Node::F],
        )
        .unwrap();
        let mut s = searcher_for(Side::First);
        let mut moves = all_moves(&state, Side::First);
        order_moves(&mut moves);
        let (mv, score) = s
            .search_root(&state, &moves, 1, Deadline::none())
            .unwrap()
            .unwrap();
        assert_eq!((mv.from, mv.to), (Node::D, Node::E));
        assert_eq!(score, WIN_SCORE);
    }

    #[test]
    fn test_expired_deadline_aborts_without_storing() {
        let state = GameState::new();
        let mut s = searcher_for(Side::First);
        let past = Deadline::at(Instant::now());
        assert_eq!(s.search(&state, 4, -INF, INF, true, past), Err(SearchAborted));
        assert_eq!(s.tt_stats().used, 0);
        assert_eq!(s.stats().nodes, 0);
    }

    #[test]
    fn test_changing_side_clears_table() {
        let state = GameState::new();
        let mut s = searcher_for(Side::First);
        s.search(&state, 2, -INF, INF, true, Deadline::none()).unwrap();
        assert!(s.tt_stats().used > 0);

        s.set_engine_side(Side::First);
        assert!(s.tt_stats().used > 0);

        s.set_engine_side(Side::Second);
        assert_eq!(s.tt_stats().used, 0);
    }

    #[test]
    fn test_score_moves_matches_root_choice() {
        let state = GameState::new();
        let mut s = searcher_for(Side::First);
        let mut moves = all_moves(&state, Side::First);
        order_moves(&mut moves);

        let scores = s.score_moves(&state, &moves, 3, Deadline::none()).unwrap();
        s.clear_tt();
        let (_, best) = s
            .search_root(&state, &moves, 3, Deadline::none())
            .unwrap()
            .unwrap();
        assert_eq!(best, *scores.iter().max().unwrap());
    }

    #[test]
    fn test_order_moves_stable() {
        let state = GameState::new();
        let mut moves = all_moves(&state, Side::First);
        order_moves(&mut moves);
        assert!(moves.windows(2).all(|w| w[0].rank >= w[1].rank));
        assert_eq!(moves[0].to, Node::X);
    }
}
