//! Presentation-level configuration
//!
//! Configuration for output formatting and REPL behavior.

use crate::cli::commands::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Reply format
    #[serde(skip)]
    pub format: Option<OutputFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            format: None,
        }
    }
}

impl OutputConfig {
    pub fn is_json(&self) -> bool {
        self.format == Some(OutputFormat::Json)
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Print the welcome banner on start
    pub show_welcome: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_welcome: true,
            history_file: None,
        }
    }
}

impl ReplConfig {
    /// History file location: the configured path (with `~/` expanded) or
    /// `<data dir>/seismic-chat/history.txt`
    pub fn history_path(&self) -> Option<PathBuf> {
        match self.history_file.as_deref() {
            Some(path) => match path.strip_prefix("~/") {
                Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
                None => Some(PathBuf::from(path)),
            },
            None => dirs::data_dir().map(|p| p.join("seismic-chat").join("history.txt")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_history_path() {
        let config = ReplConfig {
            history_file: Some("/tmp/seismic-history.txt".to_string()),
            ..ReplConfig::default()
        };
        assert_eq!(
            config.history_path(),
            Some(PathBuf::from("/tmp/seismic-history.txt"))
        );
    }

    #[test]
    fn test_default_history_path() {
        if let Some(path) = ReplConfig::default().history_path() {
            assert!(path.ends_with("seismic-chat/history.txt"));
        }
    }

    #[test]
    fn test_json_format() {
        let config = OutputConfig {
            format: Some(OutputFormat::Json),
            ..OutputConfig::default()
        };
        assert!(config.is_json());
        assert!(!OutputConfig::default().is_json());
    }
}
