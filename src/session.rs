//! One game in progress
//!
//! `Session` ties the position, its history and the engine together, and is
//! the entry point for local moves, peer messages and engine turns.

use log::{info, warn};

use crate::board::{GameState, Node, Side};
use crate::config::EngineConfig;
use crate::engine::{AIEngine, MoveResult};
use crate::error::{Error, Result};
use crate::history::{History, MoveAnalysis};
use crate::protocol::{Message, MoveRecord, StateSnapshot};
use crate::rules::{check_win, validate_move, Move, WinInfo};

/// What a peer message did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A remote move was accepted
    Move(Move),
    /// The peer's position was adopted
    Synced,
    /// The peer left
    Left,
}

pub struct Session {
    state: GameState,
    history: History,
    winner: Option<WinInfo>,
    engine: AIEngine,
    engine_side: Option<Side>,
}

impl Session {
    /// Fresh game at the start position with no engine side
    pub fn new(config: EngineConfig) -> Self {
        Self {
            state: GameState::new(),
            history: History::new(),
            winner: None,
            engine: AIEngine::with_config(config),
            engine_side: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn winner(&self) -> Option<WinInfo> {
        self.winner
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn engine(&self) -> &AIEngine {
        &self.engine
    }

    pub fn engine_side(&self) -> Option<Side> {
        self.engine_side
    }

    /// Let the engine play `side`, or nobody
    pub fn set_engine_side(&mut self, side: Option<Side>) {
        self.engine_side = side;
    }

    /// Back to the start position with an empty history and cache.
    pub fn reset(&mut self) {
        self.state = GameState::new();
        self.history.clear();
        self.winner = None;
        self.engine.clear_cache();
        info!("new game");
    }

    /// Play a local move for the side to act.
    pub fn play(&mut self, piece_index: usize, from: Node, to: Node) -> Result<Move> {
        if self.winner.is_some() {
            return Err(Error::GameOver);
        }
        let mv = validate_move(&self.state, self.state.turn(), piece_index, from, to)?;
        self.commit(mv);
        Ok(mv)
    }

    /// Validate and apply a move reported by the peer.
    ///
    /// A rejected move leaves the session untouched. A hash that disagrees
    /// with ours after the move is logged but does not undo it.
    pub fn apply_remote(&mut self, record: &MoveRecord) -> Result<Move> {
        let checked = if self.winner.is_some() {
            Err(Error::GameOver)
        } else {
            validate_move(
                &self.state,
                record.side,
                record.piece_index,
                record.from,
                record.to,
            )
        };
        let mv = match checked {
            Ok(mv) => mv,
            Err(e) => {
                warn!("rejected remote move {record:?}: {e}");
                return Err(e);
            }
        };

        self.commit(mv);
        if let Some(theirs) = record.hash {
            if theirs != self.state.hash() {
                warn!(
                    "hash mismatch after {mv}: peer {theirs:#018x}, local {:#018x}",
                    self.state.hash()
                );
            }
        }
        Ok(mv)
    }

    /// Let the engine move if it is its turn.
    ///
    /// Returns `Ok(None)` when the engine has no side, it is not its turn, or
    /// the game is over.
    pub fn engine_move(&mut self) -> Result<Option<MoveResult>> {
        let Some(side) = self.engine_side else {
            return Ok(None);
        };
        if self.winner.is_some() || self.state.turn() != side {
            return Ok(None);
        }

        let result = self.engine.get_move_with_stats(&self.state, side);
        let Some(mv) = result.best_move else {
            return Ok(None);
        };
        // The engine only proposes legal moves; re-check before committing
        let mv = validate_move(&self.state, side, mv.piece_index, mv.from, mv.to)?;
        self.commit(mv);
        Ok(Some(result))
    }

    /// Take back the latest move. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.state = snapshot.state;
                self.winner = snapshot.winner;
                true
            }
            None => false,
        }
    }

    /// Current position for the `init` handshake
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::from_state(&self.state, self.winner.map(|w| w.side))
    }

    /// Adopt a peer's position. The history restarts from it.
    pub fn load_snapshot(&mut self, snapshot: &StateSnapshot) -> Result<()> {
        let state = snapshot.to_state()?;
        self.state = state;
        self.winner = check_win(&state);
        self.history.clear();
        self.engine.clear_cache();
        if self.winner.map(|w| w.side) != snapshot.winner {
            warn!("peer snapshot winner {:?} disagrees with the position", snapshot.winner);
        }
        info!("synced position from peer, {} to move", state.turn());
        Ok(())
    }

    /// Dispatch a decoded peer message.
    pub fn handle_message(&mut self, msg: &Message) -> Result<Applied> {
        match msg {
            Message::Move { record, .. } => self.apply_remote(record).map(Applied::Move),
            Message::Init { state, .. } => {
                self.load_snapshot(state)?;
                Ok(Applied::Synced)
            }
            Message::Leave { .. } => {
                info!("peer left");
                Ok(Applied::Left)
            }
        }
    }

    /// Outgoing message for a move this session just made
    pub fn move_message(&self, mv: &Move) -> Message {
        Message::new_move(MoveRecord::from_move(mv, Some(self.state.hash())))
    }

    /// Grade every move played so far.
    pub fn analyze(&self) -> Vec<MoveAnalysis> {
        self.history.analyze(self.engine.config())
    }

    fn commit(&mut self, mv: Move) {
        self.history.push(self.state, self.winner, mv);
        self.state = self.state.apply(&mv);
        self.winner = check_win(&self.state);
        info!("{mv}");
        if let Some(win) = self.winner {
            info!(
                "{} wins on {}-{}-{}",
                win.side, win.line[0], win.line[1], win.line[2]
            );
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> EngineConfig {
        EngineConfig::with_limits(3, 2_000)
    }

    #[test]
    fn test_play_and_undo() {
        let mut session = Session::new(quick());
        let start = *session.state();

        session.play(1, Node::C, Node::X).unwrap();
        assert_eq!(session.state().turn(), Side::Second);
        assert_eq!(session.history().len(), 1);

        assert!(session.undo());
        assert_eq!(*session.state(), start);
        assert!(!session.undo());
    }

    #[test]
    fn test_illegal_local_move_leaves_state() {
        let mut session = Session::new(quick());
        let before = *session.state();
        // A is not adjacent to C
        let err = session.play(1, Node::C, Node::A).unwrap_err();
        assert!(matches!(err, Error::IllegalDestination { .. }));
        assert_eq!(*session.state(), before);
        assert!(session.history().is_empty());
    }

    fn near_win() -> StateSnapshot {
        StateSnapshot {
            turn: Side::First,
            first: [Node::A, Node::X, Node::D],
            second: [Node::H, Node::G, Node::F],
            winner: None,
        }
    }

    #[test]
    fn test_move_is_rejected_after_win() {
        let mut session = Session::new(quick());
        session.load_snapshot(&near_win()).unwrap();

        session.play(2, Node::D, Node::E).unwrap();
        let win = session.winner().unwrap();
        assert_eq!(win.side, Side::First);
        assert_eq!(win.line, [Node::A, Node::X, Node::E]);

        assert!(matches!(session.play(0, Node::H, Node::D), Err(Error::GameOver)));
        let remote = MoveRecord {
            side: Side::Second,
            piece_index: 0,
            from: Node::H,
            to: Node::D,
            hash: None,
        };
        assert!(matches!(session.apply_remote(&remote), Err(Error::GameOver)));

        // Undo clears the win again
        assert!(session.undo());
        assert!(session.winner().is_none());
    }

    #[test]
    fn test_remote_move_checks() {
        let mut session = Session::new(quick());
        let wrong_turn = MoveRecord {
            side: Side::Second,
            piece_index: 0,
            from: Node::H,
            to: Node::A,
            hash: None,
        };
        assert!(matches!(
            session.apply_remote(&wrong_turn),
            Err(Error::WrongTurn { .. })
        ));

        let stale = MoveRecord {
            side: Side::First,
            piece_index: 0,
            from: Node::C,
            to: Node::X,
            hash: None,
        };
        assert!(matches!(
            session.apply_remote(&stale),
            Err(Error::StaleOrigin { actual: Node::B, .. })
        ));

        let ghost = MoveRecord {
            piece_index: 3,
            ..stale
        };
        assert!(matches!(
            session.apply_remote(&ghost),
            Err(Error::NoSuchPiece { index: 3, .. })
        ));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_remote_hash_mismatch_still_applies() {
        let mut session = Session::new(quick());
        let record = MoveRecord {
            side: Side::First,
            piece_index: 1,
            from: Node::C,
            to: Node::X,
            hash: Some(0),
        };
        session.apply_remote(&record).unwrap();
        assert_eq!(session.state().turn(), Side::Second);
    }

    #[test]
    fn test_move_message_matches_peer_hash() {
        let mut a = Session::new(quick());
        let mut b = Session::new(quick());

        let mv = a.play(1, Node::C, Node::X).unwrap();
        let msg = a.move_message(&mv);
        let decoded = Message::from_json(&msg.to_json().unwrap()).unwrap();

        assert_eq!(b.handle_message(&decoded).unwrap(), Applied::Move(mv));
        assert_eq!(a.state().hash(), b.state().hash());
    }

    #[test]
    fn test_snapshot_sync() {
        let mut host = Session::new(quick());
        host.play(1, Node::C, Node::X).unwrap();

        let mut guest = Session::new(quick());
        let msg = Message::new_init(host.snapshot());
        assert_eq!(guest.handle_message(&msg).unwrap(), Applied::Synced);
        assert_eq!(guest.state(), host.state());
        assert!(guest.history().is_empty());
    }

    #[test]
    fn test_engine_move_only_on_its_turn() {
        let mut session = Session::new(quick());
        assert!(session.engine_move().unwrap().is_none());

        session.set_engine_side(Some(Side::Second));
        assert!(session.engine_move().unwrap().is_none());

        session.play(1, Node::C, Node::X).unwrap();
        let result = session.engine_move().unwrap().unwrap();
        assert!(result.best_move.is_some());
        assert_eq!(session.state().turn(), Side::First);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_reset() {
        let mut session = Session::new(quick());
        session.play(1, Node::C, Node::X).unwrap();
        session.reset();
        assert_eq!(*session.state(), GameState::new());
        assert!(session.history().is_empty());
        assert!(session.winner().is_none());
        assert_eq!(session.engine().tt_stats().used, 0);
    }

    #[test]
    fn test_analyze_covers_every_move() {
        let mut session = Session::new(quick());
        session.play(1, Node::C, Node::X).unwrap();
        session.play(0, Node::H, Node::A).unwrap();
        let report = session.analyze();
        assert_eq!(report.len(), 2);
        assert!(report.iter().all(|a| a.regret >= 0));
    }
}
