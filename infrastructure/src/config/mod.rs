//! Configuration file loading for seismic-chat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SEISMIC_CHAT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./seismic-chat.toml` or `./.seismic-chat.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/seismic-chat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileArtifactsConfig, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileReplConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
