//! Domain layer for seismic-chat
//!
//! This crate contains the core logic of the chat pipeline: tool
//! specifications, intent classification, slot extraction, conversation
//! context, and reply templates. It performs no I/O.
//!
//! # Core Concepts
//!
//! ## Intent
//!
//! The tool a request is judged to ask for, chosen by keyword overlap
//! ([`IntentClassifier`]).
//!
//! ## Slot
//!
//! A named parameter filled from request text by a rule table
//! ([`SlotRule`]) or, for artifacts of earlier turns, from the
//! [`ConversationContext`].
//!
//! ## Artifact
//!
//! An opaque handle to rendered output ([`ArtifactHandle`]) carried
//! between turns without being parsed.

pub mod context;
pub mod core;
pub mod extraction;
pub mod intent;
pub mod reply;
pub mod tool;

// Re-export commonly used types
pub use context::{ConversationContext, Turn};
pub use core::error::DomainError;
pub use extraction::{SlotExtractor, SlotRule, normalize};
pub use intent::{IntentClassifier, ParsedIntent, UNRECOGNIZED_HINT};
pub use reply::ReplyFormatter;
pub use tool::{
    ArtifactHandle, DefaultValue, DispatchOutcome, HandlerError, OptionalParam, ParameterSet,
    ToolHandler, ToolRegistry, ToolSpec, Value,
};
