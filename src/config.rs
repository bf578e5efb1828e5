//! Configuration for string-compress

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CompressError;
use crate::tree::TreeDumpStyle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tree_style: TreeDumpStyle,
    pub compute_baseline: bool,
    pub deflate_level: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tree_style: TreeDumpStyle::Compact,
            compute_baseline: true,
            deflate_level: 6,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document; missing fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, CompressError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CompressError::Config(e.to_string()))?;
        Ok(config.normalized())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CompressError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    fn normalized(mut self) -> Self {
        self.deflate_level = self.deflate_level.min(9);
        self
    }
}
