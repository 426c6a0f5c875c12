//! Occurrence listing by backtracking depth-first search from the leaves.
//!
//! Parents are explored in the order their edges were attached. The stack
//! and the visited set belong to one branch: a node is pushed on entry and
//! popped on exit, so a node already explored through one sibling stays
//! reachable through the next.

use crate::store::{Level, NodeId};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;

/// One complete chain of nodes, root first, leaf last.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Occurrence(Vec<NodeId>);

impl Occurrence {
    pub fn nodes(&self) -> &[NodeId] { &self.0 }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn root(&self) -> Option<NodeId> { self.0.first().copied() }
    pub fn leaf(&self) -> Option<NodeId> { self.0.last().copied() }
    pub fn iter(&self) -> std::slice::Iter<'_, NodeId> { self.0.iter() }
}

impl<'a> IntoIterator for &'a Occurrence {
    type Item = &'a NodeId;
    type IntoIter = std::slice::Iter<'a, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Lists every occurrence, leaf by leaf in creation order.
///
/// Each leaf's traversal only touches its own stack, so leaves can be
/// processed on the rayon pool; the collected order is the same either way.
pub(crate) fn enumerate(levels: &[Level], parallel: bool) -> Vec<Occurrence> {
    let Some(last) = levels.last() else {
        return Vec::new();
    };
    let leaves: Vec<NodeId> = last.ids().collect();

    let per_leaf: Vec<Vec<Occurrence>> = if parallel {
        leaves.par_iter().map(|&leaf| Backtracker::new(levels).run(leaf)).collect()
    } else {
        leaves.iter().map(|&leaf| Backtracker::new(levels).run(leaf)).collect()
    };
    per_leaf.into_iter().flatten().collect()
}

struct Backtracker<'a> {
    levels: &'a [Level],
    stack: Vec<NodeId>,
    visited: HashSet<NodeId>,
    found: Vec<Occurrence>,
}

impl<'a> Backtracker<'a> {
    fn new(levels: &'a [Level]) -> Self {
        Self {
            levels,
            stack: Vec::with_capacity(levels.len()),
            visited: HashSet::new(),
            found: Vec::new(),
        }
    }

    fn run(mut self, leaf: NodeId) -> Vec<Occurrence> {
        self.visit(leaf);
        self.found
    }

    fn visit(&mut self, id: NodeId) {
        self.stack.push(id);
        self.visited.insert(id);

        let levels = self.levels;
        let node = levels[id.level()].node(id);
        if node.is_root() {
            self.found.push(Occurrence(self.stack.iter().rev().copied().collect()));
        }
        for &parent in node.parents() {
            if !self.visited.contains(&parent) {
                self.visit(parent);
            }
        }

        self.stack.pop();
        self.visited.remove(&id);
    }
}
