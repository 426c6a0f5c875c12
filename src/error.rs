//! Crate-wide error type.

use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetTreeError {
    #[error("Schema validation failed:\n{}", render_issues(.0))]
    Schema(Vec<ValidationError>),
    #[error("Unrecognized comparison operator '{0}' (expected one of '=', '<', '>', '<=', '>=')")]
    InvalidOperator(String),
    #[error("Cannot compare a {lhs} value with a {rhs} operand")]
    InvalidComparison { lhs: &'static str, rhs: &'static str },
    #[error("Occurrence count at level {level} exceeds the 128-bit path counter")]
    PathOverflow { level: usize },
    #[error("Failed to read '{path}': {message}")]
    Io { path: String, message: String },
    #[error("Malformed input: {0}")]
    Parse(String),
}

impl NetTreeError {
    pub(crate) fn schema(issue: ValidationError) -> Self {
        NetTreeError::Schema(vec![issue])
    }

    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        NetTreeError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for NetTreeError {
    fn from(err: serde_json::Error) -> Self {
        NetTreeError::Parse(err.to_string())
    }
}

fn render_issues(issues: &[ValidationError]) -> String {
    issues
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}
