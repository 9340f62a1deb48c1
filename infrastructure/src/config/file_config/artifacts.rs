//! Artifact configuration from TOML (`[artifacts]` section)

use serde::{Deserialize, Serialize};

pub const DEFAULT_ARTIFACT_DIR: &str = "./artifacts";

/// Raw artifact configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileArtifactsConfig {
    /// Directory rendered figures are written to
    pub dir: String,
}

impl Default for FileArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_ARTIFACT_DIR.to_string(),
        }
    }
}
