//! Transformation configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the data transformation flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformationConfig {
    /// Where the fitted preprocessor artifact is written
    pub artifact_path: PathBuf,
}

impl Default for TransformationConfig {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from("artifacts").join("preprocessor.json"),
        }
    }
}

impl TransformationConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the artifact path
    pub fn with_artifact_path(mut self, path: impl AsRef<Path>) -> Self {
        self.artifact_path = path.as_ref().to_path_buf();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransformationConfig::default();
        assert_eq!(
            config.artifact_path,
            PathBuf::from("artifacts").join("preprocessor.json")
        );
    }

    #[test]
    fn test_builder_pattern() {
        let config = TransformationConfig::new().with_artifact_path("out/pre.json");
        assert_eq!(config.artifact_path, PathBuf::from("out/pre.json"));
    }
}
