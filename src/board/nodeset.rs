//! Node set as a 9-bit mask

use super::{Node, NODE_COUNT};

/// Set of board nodes, one bit per node index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeSet {
    bits: u16,
}

impl NodeSet {
    const MASK: u16 = (1 << NODE_COUNT) - 1;

    /// Create empty set
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Every node on the board
    pub const fn full() -> Self {
        Self { bits: Self::MASK }
    }

    pub const fn from_nodes(nodes: &[Node]) -> Self {
        let mut bits = 0u16;
        let mut i = 0;
        while i < nodes.len() {
            bits |= 1 << nodes[i].to_index();
            i += 1;
        }
        Self { bits }
    }

    pub(crate) const fn with(self, node: Node) -> Self {
        Self {
            bits: self.bits | (1 << node.to_index()),
        }
    }

    #[inline]
    pub fn set(&mut self, node: Node) {
        self.bits |= 1 << node.to_index();
    }

    #[inline]
    pub fn clear(&mut self, node: Node) {
        self.bits &= !(1 << node.to_index());
    }

    #[inline]
    pub const fn contains(self, node: Node) -> bool {
        (self.bits >> node.to_index()) & 1 == 1
    }

    /// Number of nodes in the set (popcount)
    #[inline]
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    #[inline]
    pub const fn union(self, other: NodeSet) -> NodeSet {
        NodeSet {
            bits: self.bits | other.bits,
        }
    }

    #[inline]
    pub const fn intersection(self, other: NodeSet) -> NodeSet {
        NodeSet {
            bits: self.bits & other.bits,
        }
    }

    /// Nodes in `self` but not in `other`
    #[inline]
    pub const fn difference(self, other: NodeSet) -> NodeSet {
        NodeSet {
            bits: self.bits & !other.bits,
        }
    }

    /// Nodes not in the set
    #[inline]
    pub const fn complement(self) -> NodeSet {
        NodeSet {
            bits: !self.bits & Self::MASK,
        }
    }

    /// Iterate over member nodes in index order
    pub fn iter(self) -> NodeSetIter {
        NodeSetIter { bits: self.bits }
    }
}

impl FromIterator<Node> for NodeSet {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        let mut set = NodeSet::new();
        for node in iter {
            set.set(node);
        }
        set
    }
}

impl IntoIterator for NodeSet {
    type Item = Node;
    type IntoIter = NodeSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the members of a NodeSet
pub struct NodeSetIter {
    bits: u16,
}

impl Iterator for NodeSetIter {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as usize;
        // Clear the bit we just found
        self.bits &= self.bits - 1;
        Node::from_index(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}
