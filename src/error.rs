//! Error types for the rules core

use thiserror::Error;

use crate::board::{Node, Side};

/// Rejections raised while validating moves and decoding peer payloads.
///
/// None of these are fatal: the position is left untouched and the caller
/// decides how to report them.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("game already over")]
    GameOver,

    #[error("not {got}'s turn (expected {expected})")]
    WrongTurn { expected: Side, got: Side },

    #[error("{side} has no piece with index {index}")]
    NoSuchPiece { side: Side, index: usize },

    #[error("{side} piece {index} is on {actual}, not {claimed}")]
    StaleOrigin {
        side: Side,
        index: usize,
        claimed: Node,
        actual: Node,
    },

    #[error("illegal destination: {from} -> {to}")]
    IllegalDestination { from: Node, to: Node },

    #[error("node {node} is occupied twice")]
    DuplicateOccupancy { node: Node },

    #[error("unsupported protocol version {got} (expected {expected})")]
    UnsupportedVersion { got: u32, expected: u32 },

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for the rules core
pub type Result<T> = std::result::Result<T, Error>;
