//! Move selection driver
//!
//! The engine picks a move for one side in three steps:
//!
//! 1. **Center opening**: any legal move onto the center is played at once
//! 2. **Iterative deepening**: alpha-beta at depth 1, 2, ... `max_depth` until
//!    the deadline passes or a win or loss is proven
//! 3. **Rank fallback**: if not even depth 1 completes, the highest-ranked
//!    move is played
//!
//! # Example
//!
//! ```
//! use trinode::{AIEngine, EngineConfig, GameState, Side};
//!
//! let mut engine = AIEngine::with_config(EngineConfig::with_limits(4, 200));
//! let state = GameState::new();
//!
//! let result = engine.get_move_with_stats(&state, Side::First);
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::time::{Duration, Instant};

use log::debug;

use crate::board::{GameState, Side};
use crate::config::EngineConfig;
use crate::eval::{Score, WIN_SCORE};
use crate::rules::{all_moves, check_win, Move};
use crate::search::{order_moves, Deadline, SearchStats, Searcher, TTStats};

/// Which path of the driver produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// A legal move onto the center, played without searching
    CenterOpening,
    /// Result of the deepest completed alpha-beta iteration
    AlphaBeta,
    /// No iteration completed before the deadline
    RankFallback,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Move>,
    /// Engine-side score of the chosen move
    pub score: Score,
    /// Deepest completed iteration (0 when no search ran)
    pub depth: u32,
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Counters accumulated over every iteration, aborted ones included
    pub stats: SearchStats,
}

impl MoveResult {
    #[inline]
    fn no_move(time_ms: u64) -> Self {
        Self {
            best_move: None,
            score: 0,
            depth: 0,
            search_type: SearchType::AlphaBeta,
            time_ms,
            stats: SearchStats::default(),
        }
    }

    /// Number of nodes searched
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.stats.nodes
    }
}

/// Move-choosing engine for one game.
///
/// Owns a [`Searcher`] and its transposition table. The table is only valid
/// for one engine side; asking for the other side's move clears it.
pub struct AIEngine {
    searcher: Searcher,
    config: EngineConfig,
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AIEngine {
    /// Engine with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            searcher: Searcher::with_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    /// Drop every cached search result. Called at the start of every game.
    pub fn clear_cache(&mut self) {
        self.searcher.clear_tt();
    }

    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.searcher.tt_stats()
    }

    /// Best move for `side` within the configured depth and time limits.
    #[must_use]
    pub fn get_move(&mut self, state: &GameState, side: Side) -> Option<Move> {
        self.get_move_with_stats(state, side).best_move
    }

    /// Same as [`AIEngine::get_move`], with search statistics.
    #[must_use]
    pub fn get_move_with_stats(&mut self, state: &GameState, side: Side) -> MoveResult {
        let EngineConfig {
            max_depth,
            time_limit_ms,
            ..
        } = self.config;
        self.choose_move(state, side, max_depth, time_limit_ms)
    }

    /// Choose a move for `engine_side`.
    ///
    /// Returns no move when the position is already won, when it is not
    /// `engine_side`'s turn, or when `engine_side` has no legal move.
    pub fn choose_move(
        &mut self,
        state: &GameState,
        engine_side: Side,
        max_depth: u32,
        time_budget_ms: u64,
    ) -> MoveResult {
        let start = Instant::now();
        let deadline = Deadline::after(Duration::from_millis(time_budget_ms));
        let elapsed_ms = |start: Instant| start.elapsed().as_millis() as u64;

        if check_win(state).is_some() || state.turn() != engine_side {
            return MoveResult::no_move(elapsed_ms(start));
        }

        let mut moves = all_moves(state, engine_side);
        if moves.is_empty() {
            return MoveResult::no_move(elapsed_ms(start));
        }
        order_moves(&mut moves);

        self.searcher.set_engine_side(engine_side);
        self.searcher.reset_stats();

        // Opening rule
        if let Some(center) = moves.iter().find(|m| m.to.is_center()).copied() {
            let score = self
                .searcher
                .evaluator()
                .evaluate(&state.apply(&center), engine_side);
            debug!("center opening {center}");
            return MoveResult {
                best_move: Some(center),
                score,
                depth: 0,
                search_type: SearchType::CenterOpening,
                time_ms: elapsed_ms(start),
                stats: self.searcher.stats(),
            };
        }

        let mut committed: Option<(Move, Score, u32)> = None;

        for depth in 1..=max_depth {
            match self.searcher.search_root(state, &moves, depth, deadline) {
                Ok(Some((best, score))) => {
                    debug!(
                        "depth {depth}: {best} score {score} nodes {}",
                        self.searcher.stats().nodes
                    );
                    committed = Some((best, score, depth));

                    // Previous best goes first next iteration
                    if let Some(pos) = moves.iter().position(|m| *m == best) {
                        moves[..=pos].rotate_right(1);
                    }
                    if score.abs() >= WIN_SCORE {
                        break;
                    }
                }
                Ok(None) => break,
                Err(aborted) => {
                    debug!("depth {depth} discarded: {aborted}");
                    break;
                }
            }
        }

        let stats = self.searcher.stats();
        match committed {
            Some((best, score, depth)) => MoveResult {
                best_move: Some(best),
                score,
                depth,
                search_type: SearchType::AlphaBeta,
                time_ms: elapsed_ms(start),
                stats,
            },
            None => {
                let fallback = moves[0];
                MoveResult {
                    best_move: Some(fallback),
                    score: self
                        .searcher
                        .evaluator()
                        .evaluate(&state.apply(&fallback), engine_side),
                    depth: 0,
                    search_type: SearchType::RankFallback,
                    time_ms: elapsed_ms(start),
                    stats,
                }
            }
        }
    }
}

/// Choose a move with a fresh default engine.
#[must_use]
pub fn choose_move(
    state: &GameState,
    engine_side: Side,
    max_depth: u32,
    time_budget_ms: u64,
) -> Option<Move> {
    AIEngine::new()
        .choose_move(state, engine_side, max_depth, time_budget_ms)
        .best_move
}
