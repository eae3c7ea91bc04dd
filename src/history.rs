//! Undo history and post-game analysis

use log::{info, warn};

use crate::board::{GameState, Side};
use crate::config::EngineConfig;
use crate::eval::{score_points, Score};
use crate::rules::{all_moves, check_win, Move, WinInfo};
use crate::search::{order_moves, Deadline, Searcher};

/// Position and winner as they were before a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub state: GameState,
    pub winner: Option<WinInfo>,
}

/// Snapshot stack plus the log of accepted moves.
///
/// Both grow by one on every accepted move and shrink together on undo.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<Snapshot>,
    moves: Vec<Move>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the position before `mv` is applied.
    pub fn push(&mut self, state: GameState, winner: Option<WinInfo>, mv: Move) {
        self.snapshots.push(Snapshot { state, winner });
        self.moves.push(mv);
    }

    /// Pop the latest snapshot and its move. `None` on an empty history.
    pub fn undo(&mut self) -> Option<Snapshot> {
        let snapshot = self.snapshots.pop()?;
        self.moves.pop();
        Some(snapshot)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Accepted moves, oldest first
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Position before the first recorded move
    pub fn initial(&self) -> Option<GameState> {
        self.snapshots.first().map(|s| s.state)
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.moves.clear();
    }

    /// Analyze the recorded game. Empty when nothing was played.
    pub fn analyze(&self, config: &EngineConfig) -> Vec<MoveAnalysis> {
        match self.initial() {
            Some(initial) => analyze_game(&initial, &self.moves, config),
            None => Vec::new(),
        }
    }
}

/// Verdict on one played move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveAnalysis {
    /// Zero-based index into the move log
    pub ply: usize,
    /// The move that was played
    pub mv: Move,
    /// Best alternative found by the fixed-depth search
    pub best: Move,
    pub best_score: Score,
    pub actual_score: Score,
    /// `best_score - actual_score`; 0 means the played move was optimal
    pub regret: Score,
}

/// Replay `moves` from `initial` and grade each one from its mover's side.
///
/// Every move is searched once at `config.analysis_depth`. Each side has its
/// own searcher, so table entries never mix perspectives. Replay stops at the
/// first move that does not fit the replayed position.
pub fn analyze_game(
    initial: &GameState,
    moves: &[Move],
    config: &EngineConfig,
) -> Vec<MoveAnalysis> {
    let mut searchers = [Searcher::with_config(config), Searcher::with_config(config)];
    for (searcher, side) in searchers.iter_mut().zip(Side::BOTH) {
        searcher.set_engine_side(side);
        searcher.clear_tt();
    }

    let mut state = *initial;
    let mut report = Vec::with_capacity(moves.len());

    for (ply, played) in moves.iter().enumerate() {
        if check_win(&state).is_some() || played.side != state.turn() {
            warn!("analysis stopped at ply {ply}: {played} does not fit the position");
            break;
        }

        let mut candidates = all_moves(&state, played.side);
        order_moves(&mut candidates);
        let Some(actual_idx) = candidates.iter().position(|m| {
            m.piece_index == played.piece_index && m.from == played.from && m.to == played.to
        }) else {
            warn!("analysis stopped at ply {ply}: {played} is not legal here");
            break;
        };

        let searcher = &mut searchers[played.side.to_index()];
        let depth = config.analysis_depth;
        let scores = match searcher.score_moves(&state, &candidates, depth, Deadline::none()) {
            Ok(scores) => scores,
            Err(aborted) => {
                warn!("analysis stopped at ply {ply}: {aborted}");
                break;
            }
        };

        // First maximum wins ties
        let mut best_idx = 0;
        for (i, &score) in scores.iter().enumerate() {
            if score > scores[best_idx] {
                best_idx = i;
            }
        }

        let entry = MoveAnalysis {
            ply,
            mv: candidates[actual_idx],
            best: candidates[best_idx],
            best_score: scores[best_idx],
            actual_score: scores[actual_idx],
            regret: scores[best_idx] - scores[actual_idx],
        };
        info!(
            "ply {}: {} scored {:.1}, best {} at {:.1}, regret {:.1}",
            ply,
            entry.mv,
            score_points(entry.actual_score),
            entry.best,
            score_points(entry.best_score),
            score_points(entry.regret)
        );
        report.push(entry);

        state = state.apply(played);
    }

    report
}
