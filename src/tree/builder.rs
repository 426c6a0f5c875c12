//! Net-tree construction: one pass over the time slices, and within each
//! slice one pass over the subrules in rule order.

use crate::error::NetTreeError;
use crate::input::{Dataset, Rule};
use crate::store::{Gap, Level, Node, Position};
use tracing::{debug, trace};

/// Populates one `Level` per subrule.
///
/// For every slice `s` at time `t` and every subrule `k` reading series `j`:
/// 1. skip Missing cells and cells failing the subrule's predicate;
/// 2. at `k == 0`, add a root with `path = 1` and put it on the frontier;
/// 3. at `k > 0`, pick the newest frontier node of level `k - 1` that reaches
///    `(s, t)`, consume it, then walk its same-level predecessor chain for as
///    long as nodes keep reaching `(s, t)`, attaching each one as a parent.
///
/// A node at level `k` carries the gap declared on subrule `k + 1`, the window
/// its successors must fall in. Subrule 0's gap is never read.
///
/// # Errors
/// `PathOverflow` if a path count or the occurrence total leaves `u128`.
pub(crate) fn build_levels(dataset: &Dataset, rule: &Rule) -> Result<Vec<Level>, NetTreeError> {
    let mut levels: Vec<Level> = (0..rule.len()).map(Level::new).collect();
    let outgoing: Vec<Gap> = (0..rule.len())
        .map(|k| rule.get(k + 1).map_or_else(Gap::default, |next| next.gap))
        .collect();

    for slice in 0..dataset.slice_count() {
        let t = dataset.timestamp(slice);

        for (k, subrule) in rule.iter().enumerate() {
            let symbol = dataset.symbol(subrule.series, slice);
            if symbol.is_missing() || !symbol.compare(subrule.operator, &subrule.reference)? {
                continue;
            }
            let position = Position { slice, series: subrule.series };

            if k == 0 {
                let level = &mut levels[0];
                let node = Node::root(symbol.clone(), position, outgoing[0], level.tail());
                let id = level.add_node(node);
                level.set_head_if_empty(id);
                level.push_frontier(id);
                level.set_tail(id);
                trace!(node = %id, slice, t, "root");
                continue;
            }

            let (before, after) = levels.split_at_mut(k);
            let previous = &mut before[k - 1];
            let level = &mut after[0];

            let Some(seed) = previous
                .frontier()
                .newest_first()
                .find(|&id| previous.node(id).reaches(slice, t))
            else {
                continue;
            };

            let mut node = Node::child(symbol.clone(), position, outgoing[k], level.tail());
            let mut cursor = Some(seed);
            while let Some(parent_id) = cursor {
                let parent = previous.node(parent_id);
                if !parent.reaches(slice, t) {
                    break;
                }
                node.attach_parent(parent_id, parent.path())
                    .ok_or(NetTreeError::PathOverflow { level: k })?;
                trace!(parent = %parent_id, slice, path = parent.path(), "edge");
                cursor = parent.predecessor();
            }

            let id = level.add_node(node);
            level.set_head_if_empty(id);
            level.set_tail(id);
            previous.consume(seed);
            level.push_frontier(id);
            trace!(node = %id, slice, t, seed = %seed, parents = level.node(id).parents().len(), "match");
        }
    }

    if let Some(last) = levels.last() {
        last.nodes()
            .iter()
            .try_fold(0u128, |total, node| total.checked_add(node.path()))
            .ok_or(NetTreeError::PathOverflow { level: last.depth() })?;
    }

    debug!(
        nodes_per_level = ?levels.iter().map(Level::len).collect::<Vec<_>>(),
        slices = dataset.slice_count(),
        "net-tree built"
    );
    Ok(levels)
}

/// Sum of path counts at the final level. `build_levels` has already checked
/// that it fits.
pub(crate) fn count_occurrences(levels: &[Level]) -> u128 {
    levels
        .last()
        .map_or(0, |last| last.nodes().iter().map(Node::path).sum())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;
    use crate::input::SubruleSpec;
    use crate::symbol::Value;
    use crate::validation::Validator;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn two_roots_one_match() -> (Dataset, Rule) {
        let data = Dataset::with_unit_steps(vec![(
            "A".to_string(),
            [5.0, 5.0, 1.0].iter().map(|&v| Some(Value::Number(v))).collect(),
        )])
        .unwrap();
        let specs = [SubruleSpec::new("A", 3, ">="), SubruleSpec::new("A", 2, "<=").with_gap(0.0, 2.0)];
        let rule = Validator::new(&data, &MatchConfig::default()).validate(&specs).unwrap();
        (data, rule)
    }

    #[test]
    fn test_nodes_store_the_gap_of_the_next_subrule() {
        let (data, rule) = two_roots_one_match();
        let levels = build_levels(&data, &rule).unwrap();

        assert!(levels[0].nodes().iter().all(|n| n.gap() == Gap { min: 0.0, max: 2.0 }));
        assert!(levels[1].nodes().iter().all(|n| n.gap() == Gap::default()));
        assert_eq!(count_occurrences(&levels), 2);
    }

    #[test]
    fn test_every_parent_edge_is_traced() {
        let (data, rule) = two_roots_one_match();
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let levels = tracing::subscriber::with_default(subscriber, || build_levels(&data, &rule)).unwrap();
        let log = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();

        assert_eq!(levels[1].node(levels[1].head().unwrap()).parents().len(), 2);
        assert_eq!(log.matches("edge parent=").count(), 2);
        assert_eq!(log.matches("match node=").count(), 1);
        assert_eq!(log.matches("root node=").count(), 2);
    }
}
