//! The `NetTree`: built once from a dataset and a rule, read-only afterwards.
//!
//! Construction lives in [`builder`], occurrence listing in [`enumerate`].
//! The enumeration is computed on first request and cached; the graph never
//! changes after `build` returns, so the cache is never invalidated.

pub mod builder;
pub mod enumerate;

pub use enumerate::Occurrence;

use crate::config::MatchConfig;
use crate::error::NetTreeError;
use crate::input::{Dataset, Rule, SubruleSpec};
use crate::store::{Level, Node, NodeId};
use crate::symbol::{Interval, Value};
use crate::validation::Validator;
use serde::Serialize;
use std::sync::OnceLock;

/// One matched cell of an occurrence, in caller-facing form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub series: String,
    pub value: Value,
    pub interval: Interval,
    pub slice: usize,
}

/// The complete result of one match: count plus every occurrence as events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub occurrences: u128,
    pub patterns: Vec<Vec<Event>>,
}

#[derive(Debug)]
pub struct NetTree {
    levels: Vec<Level>,
    series_names: Vec<String>,
    parallel: bool,
    patterns: OnceLock<Vec<Occurrence>>,
}

impl NetTree {
    /// Builds the net-tree for an already validated rule.
    pub fn build(dataset: &Dataset, rule: &Rule) -> Result<Self, NetTreeError> {
        Self::build_with_config(dataset, rule, &MatchConfig::default())
    }

    pub fn build_with_config(dataset: &Dataset, rule: &Rule, config: &MatchConfig) -> Result<Self, NetTreeError> {
        let levels = builder::build_levels(dataset, rule)?;
        Ok(Self {
            levels,
            series_names: dataset.series_names().to_vec(),
            parallel: config.parallel_enumeration,
            patterns: OnceLock::new(),
        })
    }

    /// Validates raw subrule records against the dataset, then builds.
    pub fn from_specs(dataset: &Dataset, specs: &[SubruleSpec], config: &MatchConfig) -> Result<Self, NetTreeError> {
        let rule = Validator::new(dataset, config).validate(specs)?;
        Self::build_with_config(dataset, &rule, config)
    }

    /// Number of occurrences: the sum of path counts over the final level.
    pub fn occurrences(&self) -> u128 {
        builder::count_occurrences(&self.levels)
    }

    /// Every occurrence, root to leaf. Computed once, then served from cache.
    pub fn patterns(&self) -> &[Occurrence] {
        self.patterns
            .get_or_init(|| enumerate::enumerate(&self.levels, self.parallel))
    }

    /// The matched cells of one occurrence, in chronological order.
    pub fn events(&self, occurrence: &Occurrence) -> Vec<Event> {
        occurrence
            .iter()
            .map(|&id| {
                let node = self.node(id);
                let symbol = node.symbol();
                Event {
                    series: self.series_names[symbol.series()].clone(),
                    value: symbol.value().cloned().expect("BUG: matched cell holds no value"),
                    interval: symbol.interval(),
                    slice: node.position().slice,
                }
            })
            .collect()
    }

    pub fn report(&self) -> MatchReport {
        MatchReport {
            occurrences: self.occurrences(),
            patterns: self.patterns().iter().map(|o| self.events(o)).collect(),
        }
    }

    // --- Accessors ---
    pub fn levels(&self) -> &[Level] { &self.levels }
    pub fn level(&self, depth: usize) -> Option<&Level> { self.levels.get(depth) }
    pub fn depth(&self) -> usize { self.levels.len() }
    pub fn node(&self, id: NodeId) -> &Node { self.levels[id.level()].node(id) }
    pub fn get(&self, id: NodeId) -> Option<&Node> { self.levels.get(id.level())?.get(id) }
    pub fn node_count(&self) -> usize { self.levels.iter().map(Level::len).sum() }
    pub fn series_names(&self) -> &[String] { &self.series_names }
}
