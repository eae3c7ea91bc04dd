//! Rules engine and search AI for a nine-node three-in-a-line game
//!
//! Two players each move three pieces around a 3x3 node graph:
//! - Eight perimeter nodes around a shared center `X`
//! - A move slides one piece along an edge onto an empty node
//! - Holding all three nodes of one of the four lines through `X` wins
//!
//! # Architecture
//!
//! - [`board`]: Nodes, adjacency, piece placement and the hashed position
//! - [`rules`]: Move generation, validation and win detection
//! - [`eval`]: Positional evaluation
//! - [`search`]: Alpha-beta search, transposition table, Zobrist keys
//! - [`engine`]: Iterative-deepening move driver
//! - [`history`]: Undo stack and post-game analysis
//! - [`protocol`]: Versioned peer messages
//! - [`session`]: One game in progress
//!
//! # Quick Start
//!
//! ```
//! use trinode::{EngineConfig, Node, Session, Side};
//!
//! let mut session = Session::new(EngineConfig::with_limits(4, 200));
//! session.set_engine_side(Some(Side::Second));
//!
//! // First moves C -> X, then the engine answers
//! session.play(1, Node::C, Node::X).unwrap();
//! if let Some(result) = session.engine_move().unwrap() {
//!     println!("engine plays {:?}", result.best_move);
//! }
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod history;
pub mod protocol;
pub mod rules;
pub mod search;
pub mod session;

// Re-export commonly used types for convenience
pub use board::{GameState, Node, Side};
pub use config::EngineConfig;
pub use engine::{choose_move, AIEngine, MoveResult, SearchType};
pub use error::{Error, Result};
pub use eval::{evaluate, Score};
pub use history::{analyze_game, History, MoveAnalysis};
pub use protocol::{Message, MoveRecord, StateSnapshot, PROTOCOL_VERSION};
pub use rules::{all_moves, apply_move, check_win, legal_targets, Move};
pub use session::Session;
