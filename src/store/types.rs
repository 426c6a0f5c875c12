use crate::error::NetTreeError;
use crate::validation::{ValidationError, ValidationErrorType};
use serde::{Deserialize, Serialize};

/// Handle to a node: its level (rule position) and its index within that level.
///
/// Ordering within a level follows creation order, which is also slice order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    pub level: u32,
    pub index: u32,
}

impl NodeId {
    pub fn new(level: usize, index: usize) -> Self {
        Self { level: level as u32, index: index as u32 }
    }

    #[inline(always)]
    pub fn level(&self) -> usize { self.level as usize }

    #[inline(always)]
    pub fn index(&self) -> usize { self.index as usize }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}#{}", self.level, self.index)
    }
}

/// Closed window `[min, max]` of elapsed time allowed between two chained
/// matches. Declared on the later subrule, stored on the earlier node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub min: f64,
    pub max: f64,
}

impl Default for Gap {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl Gap {
    pub fn new(min: f64, max: f64) -> Result<Self, NetTreeError> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || max < 0.0 || min > max {
            return Err(NetTreeError::schema(ValidationError::new(
                ValidationErrorType::MalformedGap,
                format!("gap must satisfy 0 <= min <= max, got ({}, {})", min, max),
            )));
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn contains(&self, elapsed: f64) -> bool {
        self.min <= elapsed && elapsed <= self.max
    }
}

/// Cell coordinates of a match in the dataset grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub slice: usize,
    pub series: usize,
}
