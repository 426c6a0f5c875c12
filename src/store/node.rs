//! Defines the `Node`, one concrete match of one subrule against one cell.

use super::types::{Gap, NodeId, Position};
use crate::symbol::Symbol;
use smallvec::SmallVec;

/// Most nodes have a handful of eligible parents; keep them inline.
pub type Parents = SmallVec<[NodeId; 4]>;

/// A match instance in the net-tree.
///
/// A node sits on two relations at once: the same-level temporal chain
/// (`predecessor`) and the cross-level match graph (`parents`). Both are
/// non-owning handles; every node is owned by its `Level`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    symbol: Symbol,
    position: Position,
    gap: Gap,
    predecessor: Option<NodeId>,
    parents: Parents,
    path: u128,
}

impl Node {
    /// A level-0 node: no parents, exactly one path.
    pub fn root(symbol: Symbol, position: Position, gap: Gap, predecessor: Option<NodeId>) -> Self {
        Self {
            symbol,
            position,
            gap,
            predecessor,
            parents: Parents::new(),
            path: 1,
        }
    }

    /// A non-root node. Its path count starts at zero and grows with each parent.
    pub fn child(symbol: Symbol, position: Position, gap: Gap, predecessor: Option<NodeId>) -> Self {
        Self {
            symbol,
            position,
            gap,
            predecessor,
            parents: Parents::new(),
            path: 0,
        }
    }

    /// Adds one parent edge and its path contribution. Returns `None`, leaving
    /// the node untouched, if the path count would overflow.
    pub(crate) fn attach_parent(&mut self, parent: NodeId, parent_path: u128) -> Option<u128> {
        self.path = self.path.checked_add(parent_path)?;
        self.parents.push(parent);
        Some(self.path)
    }

    /// Whether this node may precede a match at `slice`, observed at time `t`.
    ///
    /// The predecessor must lie in a strictly earlier slice and the elapsed
    /// time must fall inside the gap stored on this node, which is the gap of
    /// the next subrule.
    #[inline]
    pub fn reaches(&self, slice: usize, t: f64) -> bool {
        self.position.slice < slice && self.gap.contains(t - self.symbol.interval().start)
    }

    pub fn symbol(&self) -> &Symbol { &self.symbol }
    pub fn position(&self) -> Position { self.position }
    pub fn gap(&self) -> Gap { self.gap }
    pub fn predecessor(&self) -> Option<NodeId> { self.predecessor }
    pub fn parents(&self) -> &[NodeId] { &self.parents }
    pub fn path(&self) -> u128 { self.path }
    pub fn is_root(&self) -> bool { self.parents.is_empty() }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node: ({}, {})", self.position.series, self.position.slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{Interval, Value};

    fn child_at(slice: usize) -> Node {
        let symbol = Symbol::new(Some(Value::Number(1.0)), 0, Interval::new(slice as f64, slice as f64 + 1.0));
        Node::child(symbol, Position { slice, series: 0 }, Gap::default(), None)
    }

    #[test]
    fn test_attach_parent_accumulates_paths() {
        let mut node = child_at(3);
        assert_eq!(node.attach_parent(NodeId::new(0, 1), 2), Some(2));
        assert_eq!(node.attach_parent(NodeId::new(0, 0), u64::MAX as u128), Some(u64::MAX as u128 + 2));
        assert_eq!(node.parents(), &[NodeId::new(0, 1), NodeId::new(0, 0)]);
        assert!(!node.is_root());
    }

    #[test]
    fn test_attach_parent_refuses_overflow() {
        let mut node = child_at(3);
        node.attach_parent(NodeId::new(0, 0), u128::MAX).unwrap();
        assert_eq!(node.attach_parent(NodeId::new(0, 1), 1), None);
        assert_eq!(node.path(), u128::MAX);
        assert_eq!(node.parents(), &[NodeId::new(0, 0)]);
    }

    #[test]
    fn test_reaches_requires_earlier_slice_and_gap() {
        let root = Node::root(
            Symbol::new(Some(Value::Number(1.0)), 0, Interval::new(2.0, 3.0)),
            Position { slice: 2, series: 0 },
            Gap { min: 1.0, max: 2.0 },
            None,
        );
        assert!(!root.reaches(2, 2.0));
        assert!(!root.reaches(3, 2.5));
        assert!(root.reaches(3, 3.0));
        assert!(root.reaches(4, 4.0));
        assert!(!root.reaches(5, 4.5));
    }
}
