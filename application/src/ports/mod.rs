//! Port definitions (interfaces for external adapters)

pub mod conversation_logger;
