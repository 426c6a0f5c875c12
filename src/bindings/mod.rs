//! Optional Python bindings over the core.
pub mod python;
