//! The multivariate, time-indexed symbolic series the net-tree scans.

use crate::error::NetTreeError;
use crate::symbol::{Interval, Symbol, Value};
use crate::validation::{ValidationError, ValidationErrorType};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// On-disk layout of a dataset.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetSpec {
    pub timestamps: Vec<f64>,
    pub series: Vec<SeriesSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesSpec {
    pub name: String,
    /// `null` marks a missing cell.
    pub values: Vec<Option<Value>>,
}

/// Grid of Symbol cells indexed `[series][slice]`, plus slice timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    names: Vec<String>,
    timestamps: Vec<f64>,
    cells: Vec<Vec<Symbol>>,
}

impl Dataset {
    /// Builds the grid. Cell interval for slice `s` is `(t[s], t[s+1])`; the
    /// last slice collapses to `(t[s], t[s])`.
    pub fn new(timestamps: Vec<f64>, columns: Vec<(String, Vec<Option<Value>>)>) -> Result<Self, NetTreeError> {
        let mut issues = Vec::new();

        if timestamps.iter().any(|t| !t.is_finite()) {
            issues.push(dataset_issue("timestamps must be finite numbers".to_string()));
        }
        if let Some(w) = timestamps.windows(2).position(|w| w[1] <= w[0]) {
            issues.push(dataset_issue(format!(
                "timestamps must be strictly increasing (slice {} at {} follows {})",
                w + 1,
                timestamps[w + 1],
                timestamps[w]
            )));
        }

        let mut seen = HashSet::new();
        for (name, values) in &columns {
            if !seen.insert(name.as_str()) {
                issues.push(dataset_issue(format!("series '{}' is declared more than once", name)));
            }
            if values.len() != timestamps.len() {
                issues.push(dataset_issue(format!(
                    "series '{}' has {} values but there are {} timestamps",
                    name,
                    values.len(),
                    timestamps.len()
                )));
            }
        }

        if !issues.is_empty() {
            return Err(NetTreeError::Schema(issues));
        }

        let intervals: Vec<Interval> = (0..timestamps.len())
            .map(|s| Interval::new(timestamps[s], *timestamps.get(s + 1).unwrap_or(&timestamps[s])))
            .collect();

        let mut names = Vec::with_capacity(columns.len());
        let mut cells = Vec::with_capacity(columns.len());
        for (series, (name, values)) in columns.into_iter().enumerate() {
            let row = values
                .into_iter()
                .zip(&intervals)
                .map(|(value, &interval)| Symbol::new(value, series, interval))
                .collect();
            names.push(name);
            cells.push(row);
        }

        Ok(Self { names, timestamps, cells })
    }

    /// Convenience for uniformly spaced slices `0, 1, 2, ...`.
    pub fn with_unit_steps(columns: Vec<(String, Vec<Option<Value>>)>) -> Result<Self, NetTreeError> {
        let len = columns.first().map_or(0, |(_, v)| v.len());
        Self::new((0..len).map(|t| t as f64).collect(), columns)
    }

    pub fn from_spec(spec: DatasetSpec) -> Result<Self, NetTreeError> {
        let columns = spec.series.into_iter().map(|s| (s.name, s.values)).collect();
        Self::new(spec.timestamps, columns)
    }

    pub fn from_json_str(json: &str) -> Result<Self, NetTreeError> {
        Self::from_spec(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, NetTreeError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| NetTreeError::io(path, e))?;
        Self::from_json_str(&raw)
    }

    pub fn series_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn series_name(&self, series: usize) -> &str { &self.names[series] }
    pub fn series_names(&self) -> &[String] { &self.names }
    pub fn series_count(&self) -> usize { self.names.len() }
    pub fn slice_count(&self) -> usize { self.timestamps.len() }
    pub fn timestamps(&self) -> &[f64] { &self.timestamps }

    #[inline(always)]
    pub fn timestamp(&self, slice: usize) -> f64 { self.timestamps[slice] }

    #[inline(always)]
    pub fn symbol(&self, series: usize, slice: usize) -> &Symbol {
        &self.cells[series][slice]
    }

    pub fn row(&self, series: usize) -> &[Symbol] { &self.cells[series] }
}

fn dataset_issue(message: String) -> ValidationError {
    ValidationError::new(ValidationErrorType::Dataset, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_json_with_missing_cells() {
        let json = r#"{
            "timestamps": [0, 1.5, 4],
            "series": [
                { "name": "A", "values": [1, null, 3] },
                { "name": "B", "values": ["x", "y", null] }
            ]
        }"#;
        let data = Dataset::from_json_str(json).unwrap();

        assert_eq!(data.series_count(), 2);
        assert_eq!(data.slice_count(), 3);
        assert_eq!(data.series_index("B"), Some(1));
        assert!(data.symbol(0, 1).is_missing());
        assert_eq!(data.symbol(1, 0).value(), Some(&Value::Text("x".into())));
        assert_eq!(data.symbol(0, 1).interval(), Interval::new(1.5, 4.0));
        assert_eq!(data.symbol(0, 2).interval(), Interval::new(4.0, 4.0));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"timestamps": [0, 1], "series": [{{"name": "A", "values": [1, 2]}}]}}"#).unwrap();
        let data = Dataset::from_path(file.path()).unwrap();
        assert_eq!(data.row(0).len(), 2);
    }

    #[test]
    fn test_reports_every_dataset_issue() {
        let err = Dataset::new(
            vec![0.0, 2.0, 1.0],
            vec![
                ("A".into(), vec![Some(1.into()); 3]),
                ("A".into(), vec![Some(1.into()); 2]),
            ],
        )
        .unwrap_err();

        let NetTreeError::Schema(issues) = err else { panic!("expected schema error") };
        assert_eq!(issues.len(), 3, "{:?}", issues);
        assert!(issues.iter().all(|i| i.error_type == ValidationErrorType::Dataset));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Dataset::from_json_str(r#"{"timestamps": [0]}"#).unwrap_err();
        assert!(matches!(err, NetTreeError::Parse(_)));
    }
}
