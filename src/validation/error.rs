//! Defines the error types for the validation module.

/// The specific category of a validation error.
///
// This enum allows for programmatic inspection of errors, which is more
// robust than string matching on the error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorType {
    /// A subrule record lacks one of `series`, `symbol` or `op`.
    MissingField,
    /// A subrule targets a series the dataset does not contain.
    UnknownSeries,
    /// The `op` string is not one of `=`, `<`, `>`, `<=`, `>=`.
    InvalidOperator,
    /// The `symbol` is neither a number nor a string.
    InvalidSymbol,
    /// The `gap` is not a pair of non-negative bounds with `min <= max`.
    MalformedGap,
    /// The reference value cannot be compared with the values of its series.
    TypeMismatch,
    /// The rule has no subrules at all.
    EmptyRule,
    /// The dataset itself is malformed (lengths, timestamps, names).
    Dataset,
}

/// A structured error report from the validation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Position of the offending subrule, `None` for rule- or dataset-wide issues.
    pub subrule: Option<usize>,
    /// The category of the error.
    pub error_type: ValidationErrorType,
    /// A human-readable message explaining the error.
    pub message: String,
}

impl ValidationError {
    pub fn new(error_type: ValidationErrorType, message: impl Into<String>) -> Self {
        Self {
            subrule: None,
            error_type,
            message: message.into(),
        }
    }

    pub fn at_subrule(mut self, index: usize) -> Self {
        self.subrule = Some(index);
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.subrule {
            Some(i) => write!(f, "subrule {}: {}", i, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}
