//! Validation of rule records against a dataset, run before the builder.
//!
//! This is the fail-fast gate of the pipeline: unknown series, missing keys,
//! unrecognized operators, malformed gaps and incomparable reference values
//! are all reported here, never from inside the net-tree construction.

pub use self::error::{ValidationError, ValidationErrorType};
pub use self::validator::Validator;

mod error;
mod validator;
mod rules {
    pub mod fields;
    pub mod series;
}
