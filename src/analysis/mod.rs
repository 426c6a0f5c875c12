//! Post-construction analysis of a net-tree.
pub mod invariants;

pub use invariants::{verify, InvariantKind, InvariantViolation};
