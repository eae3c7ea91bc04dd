//! Board representation for the nine-node game

pub mod graph;
pub mod nodeset;
pub mod state;


// Re-exports
pub use graph::{neighbors, win_lines, WinLine, EDGES, WIN_LINES};
pub use nodeset::NodeSet;
pub use state::{GameState, Piece};

use serde::{Deserialize, Serialize};

/// Number of nodes on the board
pub const NODE_COUNT: usize = 9;

/// Pieces per side
pub const PIECES_PER_SIDE: usize = 3;

/// Board nodes.
///
/// Layout:
/// ```text
/// B - C - D
/// | \ | / |
/// A - X - E
/// | / | \ |
/// H - G - F
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Node {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    X,
}

/// The shared center of every win-line
pub const CENTER: Node = Node::X;

impl Node {
    /// All nodes in index order
    pub const ALL: [Node; NODE_COUNT] = [
        Node::A,
        Node::B,
        Node::C,
        Node::D,
        Node::E,
        Node::F,
        Node::G,
        Node::H,
        Node::X,
    ];

    #[inline]
    pub const fn to_index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// Parse a single-letter node label (case-insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Node::A),
            'B' => Some(Node::B),
            'C' => Some(Node::C),
            'D' => Some(Node::D),
            'E' => Some(Node::E),
            'F' => Some(Node::F),
            'G' => Some(Node::G),
            'H' => Some(Node::H),
            'X' => Some(Node::X),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_center(self) -> bool {
        matches!(self, Node::X)
    }

    /// Drawing position for renderers. Not used by the rules.
    pub const fn coords(self) -> (u16, u16) {
        match self {
            Node::A => (20, 200),
            Node::B => (20, 20),
            Node::C => (150, 20),
            Node::D => (280, 20),
            Node::E => (280, 200),
            Node::F => (280, 380),
            Node::G => (150, 380),
            Node::H => (20, 380),
            Node::X => (150, 200),
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "p1")]
    First,
    #[serde(rename = "p2")]
    Second,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::First, Side::Second];

    /// Get the other side
    #[inline]
    pub const fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    #[inline]
    pub const fn to_index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::First => f.write_str("P1"),
            Side::Second => f.write_str("P2"),
        }
    }
}
