//! Validation rules tying a subrule to its target series.

use crate::input::Dataset;
use crate::symbol::Value;
use crate::validation::error::{ValidationError, ValidationErrorType};

/// Resolves the series name to its index in the dataset.
pub(crate) fn resolve_series(dataset: &Dataset, name: &str) -> Result<usize, ValidationError> {
    dataset.series_index(name).ok_or_else(|| {
        ValidationError::new(
            ValidationErrorType::UnknownSeries,
            format!(
                "series '{}' does not exist (available: {:?})",
                name,
                dataset.series_names()
            ),
        )
    })
}

/// "Apples and oranges": the reference value must be comparable with every
/// observed (non-missing) value of the target series.
///
/// Passing this rule guarantees that the builder never meets an
/// `InvalidComparison` while scanning the series.
pub(crate) fn validate_value_kind(dataset: &Dataset, series: usize, reference: &Value) -> Option<ValidationError> {
    let offending = dataset
        .row(series)
        .iter()
        .filter_map(|symbol| symbol.value())
        .find(|value| value.kind() != reference.kind())?;

    Some(ValidationError::new(
        ValidationErrorType::TypeMismatch,
        format!(
            "reference {} '{}' cannot be compared with {} value '{}' of series '{}'",
            reference.kind(),
            reference,
            offending.kind(),
            offending,
            dataset.series_name(series)
        ),
    ))
}
