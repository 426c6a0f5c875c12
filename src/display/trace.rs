use crate::store::NodeId;
use crate::tree::NetTree;
use std::collections::HashMap;
use std::fmt::Write;

/// Renders the ancestry of one node: the node itself, then its parents
/// recursively in attachment order. Ancestors already printed through an
/// earlier branch are shown as a back-reference instead of being expanded again.
pub fn format_trace(tree: &NetTree, target: NodeId) -> String {
    let mut tracer = Tracer {
        tree,
        first_seen: HashMap::new(),
        output: String::new(),
    };

    if tree.get(target).is_some() {
        let _ = writeln!(tracer.output, "ANCESTRY TRACE for node {}:", target);
        let _ = writeln!(tracer.output, "--------------------------------------------------");
        tracer.trace_node(target, 1, "");
    } else {
        let _ = writeln!(tracer.output, "Error: Invalid Node ID {}", target);
    }
    tracer.output
}

struct Tracer<'a> {
    tree: &'a NetTree,
    first_seen: HashMap<NodeId, usize>,
    output: String,
}

impl<'a> Tracer<'a> {
    fn trace_node(&mut self, id: NodeId, depth: usize, prefix: &str) {
        if let Some(&seen) = self.first_seen.get(&id) {
            let _ = writeln!(self.output, "{}-> {} (Ref to D{})", prefix, id, seen);
            return;
        }
        self.first_seen.insert(id, depth);

        let node = self.tree.node(id);
        let symbol = node.symbol();
        let series = &self.tree.series_names()[symbol.series()];
        let value = symbol.value().map_or_else(|| "NaN".to_string(), |v| v.to_string());
        let _ = writeln!(
            self.output,
            "{}[D{}] {} {}={} @ t={} (path={})",
            prefix,
            depth,
            id,
            series,
            value,
            symbol.interval().start,
            node.path()
        );

        let stem = build_child_stem(prefix);
        let parents = node.parents();
        for (i, &parent) in parents.iter().enumerate() {
            let connector = if i == parents.len() - 1 { "`--" } else { "|--" };
            self.trace_node(parent, depth + 1, &format!("{}{}", stem, connector));
        }
    }
}

fn build_child_stem(current_prefix: &str) -> String {
    current_prefix.replace("`--", "   ").replace("|--", "|  ")
}
