//! Per-rule-position node arena with its head / tail / frontier bookkeeping.
//!
//! The three pieces of bookkeeping are independent: `add_node` only appends,
//! and the builder decides when `head`, `tail` and the frontier change.

use super::node::Node;
use super::types::NodeId;
use std::collections::BTreeSet;

/// Nodes of one level still eligible to seed a match at the next level.
///
/// Handles of one level order by creation, so the set doubles as an
/// insertion-ordered sequence: reverse iteration is newest-first and removal
/// by handle is logarithmic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontier {
    entries: BTreeSet<NodeId>,
}

impl Frontier {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, id: NodeId) {
        self.entries.insert(id);
    }

    /// Returns `false` if `id` was not in the frontier.
    pub fn remove(&mut self, id: NodeId) -> bool {
        self.entries.remove(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.entries.contains(&id)
    }

    /// Most recently added first.
    pub fn newest_first(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().rev().copied()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    depth: usize,
    nodes: Vec<Node>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    frontier: Frontier,
}

impl Level {
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            nodes: Vec::new(),
            head: None,
            tail: None,
            frontier: Frontier::new(),
        }
    }

    pub fn depth(&self) -> usize { self.depth }

    /// Appends a node and returns its handle.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.depth, self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Only the first call has any effect.
    pub fn set_head_if_empty(&mut self, id: NodeId) {
        if self.head.is_none() {
            self.head = Some(id);
        }
    }

    pub fn set_tail(&mut self, id: NodeId) {
        self.tail = Some(id);
    }

    pub fn push_frontier(&mut self, id: NodeId) {
        self.frontier.push(id);
    }

    /// Removes a seed that has just been matched from the frontier.
    ///
    /// # Panics
    /// If `id` is not in the frontier. The builder only consumes entries it
    /// has just read from this frontier, so a miss is a logic error.
    pub fn consume(&mut self, id: NodeId) {
        let removed = self.frontier.remove(id);
        assert!(removed, "BUG: frontier node {} missing from level {}", id, self.depth);
    }

    #[inline(always)]
    pub fn node(&self, id: NodeId) -> &Node {
        debug_assert_eq!(id.level(), self.depth);
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.level() != self.depth {
            return None;
        }
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> &[Node] { &self.nodes }

    /// Handles of every node in creation order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(move |i| NodeId::new(self.depth, i))
    }

    pub fn head(&self) -> Option<NodeId> { self.head }
    pub fn tail(&self) -> Option<NodeId> { self.tail }
    pub fn frontier(&self) -> &Frontier { &self.frontier }
    pub fn len(&self) -> usize { self.nodes.len() }
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Gap, Position};
    use crate::symbol::{Interval, Symbol, Value};

    fn root_at(slice: usize, predecessor: Option<NodeId>) -> Node {
        let symbol = Symbol::new(Some(Value::Number(1.0)), 0, Interval::new(slice as f64, slice as f64 + 1.0));
        Node::root(symbol, Position { slice, series: 0 }, Gap::default(), predecessor)
    }

    #[test]
    fn test_head_is_set_once_and_tail_follows_additions() {
        let mut level = Level::new(0);
        let a = level.add_node(root_at(0, None));
        level.set_head_if_empty(a);
        level.set_tail(a);
        let b = level.add_node(root_at(1, level.tail()));
        level.set_head_if_empty(b);
        level.set_tail(b);

        assert_eq!(level.head(), Some(a));
        assert_eq!(level.tail(), Some(b));
        assert_eq!(level.node(b).predecessor(), Some(a));
        assert_eq!(level.ids().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_frontier_scans_newest_first_and_consumes_by_handle() {
        let mut level = Level::new(0);
        let ids: Vec<NodeId> = (0..3).map(|s| level.add_node(root_at(s, None))).collect();
        for &id in &ids {
            level.push_frontier(id);
        }
        assert_eq!(level.frontier().newest_first().collect::<Vec<_>>(), vec![ids[2], ids[1], ids[0]]);

        level.consume(ids[1]);
        assert_eq!(level.frontier().iter().collect::<Vec<_>>(), vec![ids[0], ids[2]]);
        // Consumption affects membership only; the node still exists.
        assert_eq!(level.len(), 3);
    }

    #[test]
    #[should_panic(expected = "BUG: frontier node")]
    fn test_consuming_unknown_node_is_fatal() {
        let mut level = Level::new(0);
        let a = level.add_node(root_at(0, None));
        level.consume(a);
    }
}
