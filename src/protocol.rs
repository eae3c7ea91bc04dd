//! Peer messages
//!
//! Two peers keep their games in step by exchanging JSON envelopes:
//!
//! ```json
//! { "type": "move", "version": 1, "move": { "side": "p1", "pieceIndex": 1, "from": "C", "to": "X", "hash": 42 } }
//! { "type": "init", "version": 1, "state": { "turn": "p2", "first": ["B","X","D"], "second": ["H","G","F"], "winner": null } }
//! { "type": "leave", "version": 1 }
//! ```
//!
//! Transport and session discovery belong to the host.

use serde::{Deserialize, Serialize};

use crate::board::{GameState, Node, Side, PIECES_PER_SIDE};
use crate::error::{Error, Result};
use crate::rules::Move;

/// Envelope version this crate reads and writes
pub const PROTOCOL_VERSION: u32 = 1;

/// A move as sent over the wire.
///
/// `hash` is the sender's position hash after the move, when it sends one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub side: Side,
    pub piece_index: usize,
    pub from: Node,
    pub to: Node,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<u64>,
}

impl MoveRecord {
    /// Record of `mv`, tagged with the hash of the position it leads to.
    pub fn from_move(mv: &Move, hash_after: Option<u64>) -> Self {
        Self {
            side: mv.side,
            piece_index: mv.piece_index,
            from: mv.from,
            to: mv.to,
            hash: hash_after,
        }
    }
}

/// Full position for the `init` handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub turn: Side,
    pub first: [Node; PIECES_PER_SIDE],
    pub second: [Node; PIECES_PER_SIDE],
    pub winner: Option<Side>,
}

impl StateSnapshot {
    pub fn from_state(state: &GameState, winner: Option<Side>) -> Self {
        Self {
            turn: state.turn(),
            first: state.positions(Side::First),
            second: state.positions(Side::Second),
            winner,
        }
    }

    /// Rebuild the position. Fails if two pieces share a node.
    pub fn to_state(&self) -> Result<GameState> {
        GameState::from_placement(self.turn, self.first, self.second)
    }
}

/// Versioned peer message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Move {
        version: u32,
        #[serde(rename = "move")]
        record: MoveRecord,
    },
    Init {
        version: u32,
        state: StateSnapshot,
    },
    Leave {
        version: u32,
    },
}

impl Message {
    pub fn new_move(record: MoveRecord) -> Self {
        Message::Move {
            version: PROTOCOL_VERSION,
            record,
        }
    }

    pub fn new_init(state: StateSnapshot) -> Self {
        Message::Init {
            version: PROTOCOL_VERSION,
            state,
        }
    }

    pub fn new_leave() -> Self {
        Message::Leave {
            version: PROTOCOL_VERSION,
        }
    }

    pub fn version(&self) -> u32 {
        match *self {
            Message::Move { version, .. }
            | Message::Init { version, .. }
            | Message::Leave { version } => version,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode an envelope, rejecting any version other than [`PROTOCOL_VERSION`].
    pub fn from_json(json: &str) -> Result<Self> {
        let msg: Message = serde_json::from_str(json)?;
        match msg.version() {
            PROTOCOL_VERSION => Ok(msg),
            got => Err(Error::UnsupportedVersion {
                got,
                expected: PROTOCOL_VERSION,
            }),
        }
    }
}
