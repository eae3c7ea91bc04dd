//! Game rules
//!
//! This module implements the rule set:
//! - Sliding moves along edges onto empty nodes
//! - Static move ranking for search ordering
//! - Win condition (three in a win-line)

pub mod movegen;
pub mod win;

// Re-exports for convenient access
pub use movegen::{all_moves, apply_move, legal_targets, rank_move, validate_move, Move};
pub use win::{check_winner, check_win, WinInfo};
