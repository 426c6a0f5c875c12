//! Rule records as supplied by callers, and the validated `Rule` the builder consumes.

use crate::error::NetTreeError;
use crate::store::Gap;
use crate::symbol::{Operator, Value};
use crate::validation::{ValidationError, ValidationErrorType};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One unvalidated subrule record: `{series, symbol, op, gap?}`.
///
/// Fields are kept loose so that the validator can report every missing or
/// malformed field with its position instead of stopping at the first serde
/// error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubruleSpec {
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub symbol: Option<serde_json::Value>,
    #[serde(default)]
    pub op: Option<String>,
    #[serde(default)]
    pub gap: Option<serde_json::Value>,
}

impl SubruleSpec {
    pub fn new(series: &str, symbol: impl Into<serde_json::Value>, op: &str) -> Self {
        Self {
            series: Some(series.to_string()),
            symbol: Some(symbol.into()),
            op: Some(op.to_string()),
            gap: None,
        }
    }

    pub fn with_gap(mut self, min: f64, max: f64) -> Self {
        self.gap = Some(serde_json::json!([min, max]));
        self
    }
}

/// Parses an array of subrule records.
pub fn parse_rule_json(json: &str) -> Result<Vec<SubruleSpec>, NetTreeError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_rule(path: impl AsRef<Path>) -> Result<Vec<SubruleSpec>, NetTreeError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| NetTreeError::io(path, e))?;
    parse_rule_json(&raw)
}

/// One validated rule position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subrule {
    /// Index of the target series in the dataset.
    pub series: usize,
    pub series_name: String,
    pub reference: Value,
    pub operator: Operator,
    /// Allowed elapsed time from a match of the previous subrule to a match
    /// of this one. Unused at position 0.
    pub gap: Gap,
}

/// A non-empty, ordered chain of subrules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    subrules: Vec<Subrule>,
}

impl Rule {
    pub fn new(subrules: Vec<Subrule>) -> Result<Self, NetTreeError> {
        if subrules.is_empty() {
            return Err(NetTreeError::schema(ValidationError::new(
                ValidationErrorType::EmptyRule,
                "a rule needs at least one subrule",
            )));
        }
        Ok(Self { subrules })
    }

    pub fn len(&self) -> usize { self.subrules.len() }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool { self.subrules.is_empty() }

    pub fn get(&self, position: usize) -> Option<&Subrule> { self.subrules.get(position) }
    pub fn iter(&self) -> std::slice::Iter<'_, Subrule> { self.subrules.iter() }
    pub fn subrules(&self) -> &[Subrule] { &self.subrules }
}

impl<'a> IntoIterator for &'a Rule {
    type Item = &'a Subrule;
    type IntoIter = std::slice::Iter<'a, Subrule>;

    fn into_iter(self) -> Self::IntoIter {
        self.subrules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_with_optional_gap() {
        let specs = parse_rule_json(
            r#"[
                {"series": "A", "symbol": 3, "op": ">=", "gap": [0, 1]},
                {"series": "B", "symbol": "X", "op": "="}
            ]"#,
        )
        .unwrap();
        assert_eq!(specs.len(), 2);
        let expected = SubruleSpec {
            gap: Some(serde_json::json!([0, 1])),
            ..SubruleSpec::new("A", 3, ">=")
        };
        assert_eq!(specs[0], expected);
        assert_eq!(specs[1].gap, None);
    }

    #[test]
    fn test_missing_keys_still_parse() {
        // Reported later by the validator, with the subrule position.
        let specs = parse_rule_json(r#"[{"series": "A"}]"#).unwrap();
        assert_eq!(specs[0].op, None);
    }

    #[test]
    fn test_empty_rule_is_rejected() {
        let err = Rule::new(Vec::new()).unwrap_err();
        let NetTreeError::Schema(issues) = err else { panic!("expected schema error") };
        assert_eq!(issues[0].error_type, ValidationErrorType::EmptyRule);
    }
}
