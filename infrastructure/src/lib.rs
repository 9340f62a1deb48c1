//! Infrastructure layer for seismic-chat
//!
//! This crate contains the concrete seismic tool handlers, the figure
//! renderer they draw with, and adapters for the application ports,
//! including configuration file loading.

pub mod config;
pub mod logging;
pub mod render;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileArtifactsConfig, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileReplConfig,
};
pub use logging::JsonlConversationLogger;
pub use render::{
    FigureRenderer, MemoryFigureRenderer, RenderError, SvgFigureRenderer, WaveletFigure,
};
pub use tools::default_registry;
