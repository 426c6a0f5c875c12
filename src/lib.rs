//! Sequential pattern occurrence search over multivariate symbolic time series.
//!
//! A rule is an ordered chain of per-series value conditions, each separated
//! from the previous by a bounded time gap. The net-tree is built in a single
//! pass over the series, one level per rule position; the number of
//! occurrences falls out of the path counts at the last level, and the
//! occurrences themselves are listed by backtracking from the leaves.
//!
//! ```no_run
//! use nettree_core::{Dataset, MatchConfig, NetTree, SubruleSpec};
//!
//! let data = Dataset::from_path("data.json")?;
//! let rule = [
//!     SubruleSpec::new("A", 3, ">="),
//!     SubruleSpec::new("B", 1, "<").with_gap(0.0, 5.0),
//! ];
//! let tree = NetTree::from_specs(&data, &rule, &MatchConfig::default())?;
//! println!("{} occurrences", tree.occurrences());
//! # Ok::<(), nettree_core::NetTreeError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod store;
pub mod symbol;
pub mod tree;
pub mod validation;

#[cfg(feature = "python")]
pub mod bindings;

pub use config::MatchConfig;
pub use error::NetTreeError;
pub use input::{Dataset, Rule, Subrule, SubruleSpec};
pub use store::{Gap, NodeId};
pub use symbol::{Interval, Operator, Symbol, Value};
pub use tree::{Event, MatchReport, NetTree, Occurrence};
pub use validation::Validator;

#[cfg(feature = "python")]
use pyo3::prelude::*;

// --- Module Definition ---
/// Defines the `_core` Python module. The leading underscore marks it as the
/// compiled component behind a thin Python package.
#[cfg(feature = "python")]
#[pymodule]
fn _core(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(bindings::python::rust_core_version, m)?)?;
    m.add_class::<bindings::python::PyNetTree>()?;
    Ok(())
}
