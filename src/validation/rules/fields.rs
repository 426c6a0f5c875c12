//! Validation rules for the scalar fields of a subrule record.

use crate::store::Gap;
use crate::symbol::{Operator, Value};
use crate::validation::error::{ValidationError, ValidationErrorType};

pub(crate) fn parse_operator(op: &str) -> Result<Operator, ValidationError> {
    op.parse().map_err(|_| {
        ValidationError::new(
            ValidationErrorType::InvalidOperator,
            format!("unrecognized operator '{}' (expected one of '=', '<', '>', '<=', '>=')", op),
        )
    })
}

/// The reference value must be a JSON number or string.
pub(crate) fn parse_reference(symbol: &serde_json::Value) -> Result<Value, ValidationError> {
    match symbol {
        serde_json::Value::Number(n) => n.as_f64().map(Value::Number).ok_or_else(|| invalid_symbol(symbol)),
        serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
        _ => Err(invalid_symbol(symbol)),
    }
}

fn invalid_symbol(symbol: &serde_json::Value) -> ValidationError {
    ValidationError::new(
        ValidationErrorType::InvalidSymbol,
        format!("symbol must be a number or a string, got {}", symbol),
    )
}

/// Accepts `[min, max]` with non-negative numeric bounds and `min <= max`.
/// A missing gap falls back to `default`.
pub(crate) fn parse_gap(gap: Option<&serde_json::Value>, default: Gap) -> Result<Gap, ValidationError> {
    let Some(raw) = gap else {
        return Ok(default);
    };

    let malformed = |detail: String| ValidationError::new(ValidationErrorType::MalformedGap, detail);

    let bounds = raw
        .as_array()
        .filter(|a| a.len() == 2)
        .ok_or_else(|| malformed(format!("gap must be a [min, max] pair, got {}", raw)))?;

    let (Some(min), Some(max)) = (bounds[0].as_f64(), bounds[1].as_f64()) else {
        return Err(malformed(format!("gap bounds must be numbers, got {}", raw)));
    };

    Gap::new(min, max).map_err(|_| malformed(format!("gap must satisfy 0 <= min <= max, got [{}, {}]", min, max)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!([0, 5]), 0.0, 5.0)]
    #[case(json!([1.5, 1.5]), 1.5, 1.5)]
    fn test_valid_gaps(#[case] raw: serde_json::Value, #[case] min: f64, #[case] max: f64) {
        let gap = parse_gap(Some(&raw), Gap::default()).unwrap();
        assert_eq!(gap, Gap { min, max });
    }

    #[rstest]
    #[case(json!([2, 1]))]
    #[case(json!([-1, 1]))]
    #[case(json!([0]))]
    #[case(json!([0, 1, 2]))]
    #[case(json!(["a", 1]))]
    #[case(json!({"min": 0, "max": 1}))]
    #[case(json!(3))]
    fn test_malformed_gaps(#[case] raw: serde_json::Value) {
        let err = parse_gap(Some(&raw), Gap::default()).unwrap_err();
        assert_eq!(err.error_type, ValidationErrorType::MalformedGap);
    }

    #[test]
    fn test_missing_gap_uses_default() {
        let default = Gap { min: 0.0, max: 2.0 };
        assert_eq!(parse_gap(None, default).unwrap(), default);
    }

    #[rstest]
    #[case(json!(3), Value::Number(3.0))]
    #[case(json!(-0.5), Value::Number(-0.5))]
    #[case(json!("X"), Value::Text("X".into()))]
    fn test_reference_values(#[case] raw: serde_json::Value, #[case] expected: Value) {
        assert_eq!(parse_reference(&raw).unwrap(), expected);
    }

    #[rstest]
    #[case(json!(true))]
    #[case(json!(null))]
    #[case(json!([1]))]
    fn test_invalid_reference_values(#[case] raw: serde_json::Value) {
        assert_eq!(parse_reference(&raw).unwrap_err().error_type, ValidationErrorType::InvalidSymbol);
    }
}
