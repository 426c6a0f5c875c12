//! Human-facing renderings of a finished net-tree.
pub mod dot;
pub mod grid;
pub mod trace;

pub use dot::{to_dot, to_graph};
pub use grid::render_occurrence;
pub use trace::format_trace;
