//! Input side of the matcher: the symbolic dataset and the rule records.
pub mod dataset;
pub mod rule;

pub use dataset::{Dataset, DatasetSpec, SeriesSpec};
pub use rule::{load_rule, parse_rule_json, Rule, Subrule, SubruleSpec};
