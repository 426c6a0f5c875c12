//! Arena storage for the net-tree: handles, nodes and per-rule-position levels.
pub mod level;
pub mod node;
pub mod types;

pub use level::{Frontier, Level};
pub use node::{Node, Parents};
pub use types::{Gap, NodeId, Position};
