//! Structural audit of a finished net-tree.
//!
//! Checks the properties every correctly built graph must satisfy and
//! reports all violations found, like a linter run after construction.

use crate::store::{Level, NodeId};
use crate::tree::NetTree;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantKind {
    /// A root has parents or a path count other than one.
    RootShape,
    /// A non-root path count differs from the sum of its parents' counts.
    PathSum,
    /// A parent is not on the previous level, is not earlier, or is out of its gap window.
    ParentEdge,
    /// Nodes of a level are not in strictly increasing slice order.
    LevelOrder,
    /// `head`, `tail` or a `predecessor` link does not match creation order.
    Threading,
    /// The enumerated pattern count differs from the occurrence count.
    OccurrenceCount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    pub node: Option<NodeId>,
    pub kind: InvariantKind,
    pub message: String,
}

impl InvariantViolation {
    fn at(node: NodeId, kind: InvariantKind, message: String) -> Self {
        Self { node: Some(node), kind, message }
    }
}

/// Runs every check.
///
/// # Returns
/// - `Ok(())` if the graph is consistent.
/// - `Err(Vec<InvariantViolation>)` with everything that is not.
pub fn verify(tree: &NetTree) -> Result<(), Vec<InvariantViolation>> {
    let mut violations = Vec::new();

    for (depth, level) in tree.levels().iter().enumerate() {
        check_threading(level, &mut violations);
        for id in level.ids() {
            if depth == 0 {
                check_root(tree, id, &mut violations);
            } else {
                check_parents(tree, id, &mut violations);
            }
        }
    }

    let listed = tree.patterns().len() as u128;
    if listed != tree.occurrences() {
        violations.push(InvariantViolation {
            node: None,
            kind: InvariantKind::OccurrenceCount,
            message: format!("{} occurrences counted but {} enumerated", tree.occurrences(), listed),
        });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_root(tree: &NetTree, id: NodeId, out: &mut Vec<InvariantViolation>) {
    let node = tree.node(id);
    if !node.parents().is_empty() || node.path() != 1 {
        out.push(InvariantViolation::at(
            id,
            InvariantKind::RootShape,
            format!("root has {} parents and path {}", node.parents().len(), node.path()),
        ));
    }
}

fn check_parents(tree: &NetTree, id: NodeId, out: &mut Vec<InvariantViolation>) {
    let node = tree.node(id);
    let slice = node.position().slice;
    let t = node.symbol().interval().start;

    if node.parents().is_empty() {
        out.push(InvariantViolation::at(id, InvariantKind::ParentEdge, "non-root node without parents".into()));
    }

    let mut sum = 0u128;
    for &parent_id in node.parents() {
        let Some(parent) = tree.get(parent_id).filter(|_| parent_id.level() + 1 == id.level()) else {
            out.push(InvariantViolation::at(
                id,
                InvariantKind::ParentEdge,
                format!("parent {} is not on the previous level", parent_id),
            ));
            continue;
        };
        if !parent.reaches(slice, t) {
            out.push(InvariantViolation::at(
                id,
                InvariantKind::ParentEdge,
                format!("parent {} does not reach slice {} within {:?}", parent_id, slice, parent.gap()),
            ));
        }
        sum = sum.saturating_add(parent.path());
    }

    if sum != node.path() {
        out.push(InvariantViolation::at(
            id,
            InvariantKind::PathSum,
            format!("path {} but parents sum to {}", node.path(), sum),
        ));
    }
}

fn check_threading(level: &Level, out: &mut Vec<InvariantViolation>) {
    let ids: Vec<NodeId> = level.ids().collect();

    if level.head() != ids.first().copied() || level.tail() != ids.last().copied() {
        out.push(InvariantViolation {
            node: None,
            kind: InvariantKind::Threading,
            message: format!("level {} head/tail do not match its first/last node", level.depth()),
        });
    }

    for (i, &id) in ids.iter().enumerate() {
        let node = level.node(id);
        let expected = i.checked_sub(1).map(|p| ids[p]);
        if node.predecessor() != expected {
            out.push(InvariantViolation::at(
                id,
                InvariantKind::Threading,
                format!("predecessor {:?}, expected {:?}", node.predecessor(), expected),
            ));
        }
        if let Some(prev) = expected {
            if level.node(prev).position().slice >= node.position().slice {
                out.push(InvariantViolation::at(
                    id,
                    InvariantKind::LevelOrder,
                    "node is not strictly later than its predecessor".into(),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;
    use crate::input::{Dataset, SubruleSpec};
    use crate::symbol::Value;
    use crate::validation::Validator;

    /// Small deterministic generator so the sweep needs no extra crates.
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self, bound: u64) -> u64 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (self.0 >> 33) % bound
        }
    }

    fn random_dataset(seed: u64, slices: usize) -> Dataset {
        let mut rng = Lcg(seed);
        let mut column = |name: &str| {
            let values = (0..slices)
                .map(|_| match rng.next(6) {
                    0 => None,
                    v => Some(Value::Number(v as f64)),
                })
                .collect();
            (name.to_string(), values)
        };
        let columns = vec![column("A"), column("B"), column("C")];
        Dataset::with_unit_steps(columns).unwrap()
    }

    #[test]
    fn test_random_graphs_satisfy_all_invariants() {
        let rules = [
            vec![SubruleSpec::new("A", 3, ">="), SubruleSpec::new("B", 2, "<=").with_gap(0.0, 3.0)],
            vec![
                SubruleSpec::new("A", 2, ">"),
                SubruleSpec::new("B", 4, "<").with_gap(0.0, 4.0),
                SubruleSpec::new("C", 3, "=").with_gap(1.0, 3.0),
            ],
            vec![
                SubruleSpec::new("A", 1, ">="),
                SubruleSpec::new("A", 1, ">=").with_gap(0.0, 6.0),
                SubruleSpec::new("B", 1, ">=").with_gap(0.0, 6.0),
                SubruleSpec::new("C", 5, "<=").with_gap(0.0, 6.0),
            ],
        ];

        for seed in 0..40 {
            let data = random_dataset(seed, 30);
            for specs in &rules {
                let config = MatchConfig::default();
                let rule = Validator::new(&data, &config).validate(specs).unwrap();
                let tree = NetTree::build_with_config(&data, &rule, &config).unwrap();
                verify(&tree).unwrap_or_else(|v| panic!("seed {}: {:?}", seed, v));

                for occurrence in tree.patterns() {
                    assert_eq!(occurrence.len(), specs.len());
                    for (k, pair) in occurrence.nodes().windows(2).enumerate() {
                        let (earlier, later) = (tree.node(pair[0]), tree.node(pair[1]));
                        let elapsed = later.symbol().interval().start - earlier.symbol().interval().start;
                        assert!(elapsed > 0.0);
                        assert!(rule.get(k + 1).unwrap().gap.contains(elapsed));
                    }
                }
            }
        }
    }

    #[test]
    fn test_multi_parent_paths_accumulate_across_levels() {
        let data = Dataset::with_unit_steps(vec![
            ("A".into(), [1, 1, 0, 0, 0].iter().map(|&v| Some(Value::from(v))).collect()),
            ("B".into(), [0, 0, 1, 1, 0].iter().map(|&v| Some(Value::from(v))).collect()),
            ("C".into(), [0, 0, 0, 0, 1].iter().map(|&v| Some(Value::from(v))).collect()),
        ])
        .unwrap();
        let specs = [
            SubruleSpec::new("A", 1, "="),
            SubruleSpec::new("B", 1, "=").with_gap(0.0, 3.0),
            SubruleSpec::new("C", 1, "=").with_gap(0.0, 2.0),
        ];
        let tree = NetTree::from_specs(&data, &specs, &MatchConfig::default()).unwrap();

        // B@2 <- {A@1, A@0} (path 2), B@3 <- {A@0} (path 1), C@4 <- {B@3, B@2} (path 3).
        let leaf = tree.level(2).unwrap().head().unwrap();
        assert_eq!(tree.node(leaf).path(), 3);
        assert_eq!(tree.occurrences(), 3);
        assert!(verify(&tree).is_ok());
    }
}
