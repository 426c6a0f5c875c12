//! Graphviz export of the net-tree.

use crate::store::NodeId;
use crate::tree::NetTree;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Copies the match graph into a `petgraph` graph, edges running parent -> child.
///
/// Node weights are display labels; the returned map gives the graph index
/// of every net-tree handle.
pub fn to_graph(tree: &NetTree) -> (DiGraph<String, ()>, HashMap<NodeId, NodeIndex>) {
    let mut graph = DiGraph::with_capacity(tree.node_count(), 0);
    let mut index = HashMap::with_capacity(tree.node_count());

    for level in tree.levels() {
        for id in level.ids() {
            let node = level.node(id);
            let symbol = node.symbol();
            let value = symbol.value().map_or_else(|| "NaN".to_string(), |v| v.to_string());
            let label = format!(
                "{} {}={} t={} path={}",
                id,
                tree.series_names()[symbol.series()],
                value,
                symbol.interval().start,
                node.path()
            );
            index.insert(id, graph.add_node(label));
        }
    }

    for level in tree.levels().iter().skip(1) {
        for id in level.ids() {
            for parent in level.node(id).parents() {
                graph.add_edge(index[parent], index[&id], ());
            }
        }
    }

    (graph, index)
}

pub fn to_dot(tree: &NetTree) -> String {
    let (graph, _) = to_graph(tree);
    format!("{:?}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
}
