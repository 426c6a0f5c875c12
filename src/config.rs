//! Matching configuration.

use crate::error::NetTreeError;
use crate::store::Gap;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Gap applied to any subrule that does not declare its own.
    pub default_gap: Gap,
    /// Enumerate occurrences of different leaves on the rayon pool.
    pub parallel_enumeration: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            default_gap: Gap::default(),
            parallel_enumeration: true,
        }
    }
}

impl MatchConfig {
    pub fn from_json_str(json: &str) -> Result<Self, NetTreeError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        // Route the gap through its constructor so bad bounds are rejected.
        Gap::new(config.default_gap.min, config.default_gap.max)?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, NetTreeError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| NetTreeError::io(path, e))?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::from_json_str("{}").unwrap();
        assert_eq!(config.default_gap, Gap { min: 0.0, max: 1.0 });
        assert!(config.parallel_enumeration);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_gap": {{"min": 0, "max": 2}}, "parallel_enumeration": false}}"#).unwrap();

        let config = MatchConfig::from_path(file.path()).unwrap();
        assert_eq!(config.default_gap, Gap { min: 0.0, max: 2.0 });
        assert!(!config.parallel_enumeration);
    }

    #[test]
    fn test_rejects_inverted_gap() {
        let err = MatchConfig::from_json_str(r#"{"default_gap": {"min": 3, "max": 1}}"#).unwrap_err();
        assert!(matches!(err, NetTreeError::Schema(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = MatchConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, NetTreeError::Io { .. }));
    }
}
