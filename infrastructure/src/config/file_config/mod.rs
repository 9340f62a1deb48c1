//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

mod artifacts;
mod logging;
mod output;
mod repl;

pub use artifacts::FileArtifactsConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("artifacts.dir cannot be empty")]
    EmptyArtifactDir,

    #[error("{field} cannot be an empty path")]
    EmptyPath { field: &'static str },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Where rendered figures are written
    pub artifacts: FileArtifactsConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Log and transcript files
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.artifacts.dir.trim().is_empty() {
            return Err(ConfigValidationError::EmptyArtifactDir);
        }

        let paths = [
            ("repl.history_file", &self.repl.history_file),
            ("logging.transcript", &self.logging.transcript),
            ("logging.file", &self.logging.file),
        ];
        for (field, path) in paths {
            if path.as_deref().is_some_and(|p| p.trim().is_empty()) {
                return Err(ConfigValidationError::EmptyPath { field });
            }
        }

        Ok(())
    }
}
