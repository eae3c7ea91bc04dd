//! Static board topology: edges, adjacency and win-lines

use super::{Node, NodeSet, NODE_COUNT};

/// The 16 undirected edges of the board.
///
/// Perimeter: top (B-C-D), bottom (H-G-F), left (B-A-H), right (D-E-F).
/// Cross lines through the center: AXE, CXG, BXF, HXD.
pub const EDGES: [(Node, Node); 16] = [
    // perimeter
    (Node::B, Node::C),
    (Node::C, Node::D),
    (Node::H, Node::G),
    (Node::G, Node::F),
    (Node::B, Node::A),
    (Node::A, Node::H),
    (Node::D, Node::E),
    (Node::E, Node::F),
    // cross through X
    (Node::A, Node::X),
    (Node::X, Node::E),
    (Node::C, Node::X),
    (Node::X, Node::G),
    (Node::B, Node::X),
    (Node::X, Node::F),
    (Node::H, Node::X),
    (Node::X, Node::D),
];

/// A winning triple: (outer, center, outer)
pub type WinLine = [Node; 3];

/// The four win-lines, in the order they are checked
pub const WIN_LINES: [WinLine; 4] = [
    [Node::A, Node::X, Node::E],
    [Node::G, Node::X, Node::C],
    [Node::H, Node::X, Node::D],
    [Node::B, Node::X, Node::F],
];

const fn build_adjacency(edges: &[(Node, Node)]) -> [NodeSet; NODE_COUNT] {
    let mut adj = [NodeSet::new(); NODE_COUNT];
    let mut i = 0;
    while i < edges.len() {
        let (u, v) = edges[i];
        adj[u.to_index()] = adj[u.to_index()].with(v);
        adj[v.to_index()] = adj[v.to_index()].with(u);
        i += 1;
    }
    adj
}

const ADJACENCY: [NodeSet; NODE_COUNT] = build_adjacency(&EDGES);

/// Nodes joined to `node` by an edge
#[inline]
pub fn neighbors(node: Node) -> NodeSet {
    ADJACENCY[node.to_index()]
}

/// True if `a` and `b` share an edge
#[inline]
pub fn are_adjacent(a: Node, b: Node) -> bool {
    ADJACENCY[a.to_index()].contains(b)
}

#[inline]
pub fn win_lines() -> &'static [WinLine; 4] {
    &WIN_LINES
}

/// Win-lines passing through `node`
pub fn lines_through(node: Node) -> impl Iterator<Item = &'static WinLine> {
    win_lines().iter().filter(move |line| line.contains(&node))
}
