use crate::config::MatchConfig;
use crate::display::{dot, grid};
use crate::error::NetTreeError;
use crate::input::{parse_rule_json, Dataset};
use crate::tree::NetTree;
use pyo3::exceptions::{PyIOError, PyIndexError, PyOverflowError, PyTypeError, PyValueError};
use pyo3::prelude::*;

/// Version of the compiled core, to confirm the bridge from Python.
#[pyfunction]
pub fn rust_core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

fn to_py_err(err: NetTreeError) -> PyErr {
    match err {
        NetTreeError::InvalidComparison { .. } => PyTypeError::new_err(err.to_string()),
        NetTreeError::Io { .. } => PyIOError::new_err(err.to_string()),
        NetTreeError::PathOverflow { .. } => PyOverflowError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

#[pyclass(name = "_NetTree")]
pub struct PyNetTree {
    dataset: Dataset,
    tree: NetTree,
}

#[pymethods]
impl PyNetTree {
    /// Validates the rule against the dataset and builds the net-tree.
    /// All inputs are JSON documents in the crate's file formats.
    #[new]
    #[pyo3(signature = (data_json, rule_json, config_json=None))]
    pub fn new(data_json: &str, rule_json: &str, config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(raw) => MatchConfig::from_json_str(raw).map_err(to_py_err)?,
            None => MatchConfig::default(),
        };
        let dataset = Dataset::from_json_str(data_json).map_err(to_py_err)?;
        let specs = parse_rule_json(rule_json).map_err(to_py_err)?;
        let tree = NetTree::from_specs(&dataset, &specs, &config).map_err(to_py_err)?;
        Ok(Self { dataset, tree })
    }

    #[getter]
    pub fn occurrences(&self) -> u128 {
        self.tree.occurrences()
    }

    /// Every occurrence as a list of `(series_index, slice_index)` cells.
    pub fn patterns(&self) -> Vec<Vec<(usize, usize)>> {
        self.tree
            .patterns()
            .iter()
            .map(|o| {
                o.iter()
                    .map(|&id| {
                        let pos = self.tree.node(id).position();
                        (pos.series, pos.slice)
                    })
                    .collect()
            })
            .collect()
    }

    /// The full match report (count plus events) as a JSON string.
    pub fn report_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.tree.report()).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    pub fn render(&self, index: usize) -> PyResult<String> {
        grid::render_occurrence(&self.dataset, &self.tree, index)
            .ok_or_else(|| PyIndexError::new_err(format!("no occurrence {}", index)))
    }

    pub fn to_dot(&self) -> String {
        dot::to_dot(&self.tree)
    }

    pub fn node_count(&self) -> usize {
        self.tree.node_count()
    }
}
