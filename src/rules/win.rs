//! Win condition checking
//!
//! A side wins by holding all three nodes of a win-line. Every line passes
//! through the center, so two sides can never both own a line; lines are still
//! checked in their fixed order so the result is deterministic.

use serde::{Deserialize, Serialize};

use crate::board::{win_lines, GameState, Side, WinLine};

/// A completed win-line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinInfo {
    pub side: Side,
    pub line: WinLine,
}

/// First win-line fully occupied by one side, if any
pub fn check_win(state: &GameState) -> Option<WinInfo> {
    for line in win_lines() {
        let owner = state.occupant(line[0]);
        if let Some(side) = owner {
            if line[1..].iter().all(|&n| state.occupant(n) == owner) {
                return Some(WinInfo { side, line: *line });
            }
        }
    }
    None
}

/// Winning side, if any
#[inline]
pub fn check_winner(state: &GameState) -> Option<Side> {
    check_win(state).map(|w| w.side)
}
