//! Tool domain module
//!
//! Defines what a tool *is* to the chat pipeline: a named schema plus a
//! handler.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌─────────────────┐
//! │ ToolSpec     │───▶│ ParameterSet │───▶│ DispatchOutcome │
//! │ (registry)   │    │ (arguments)  │    │ (result)        │
//! └──────┬───────┘    └──────────────┘    └─────────────────┘
//!        │
//!        ├─ keywords: "ricker", "wavelet", ...   (intent)
//!        ├─ slots:    frequency ← Frequency      (extraction)
//!        └─ schema:   required / optional+default (dispatch)
//! ```
//!
//! # Key Types
//!
//! - [`ToolSpec`] — one tool: keywords, schema, slot rules, handler
//! - [`ToolRegistry`] — ordered catalog of specs
//! - [`Value`] / [`ParameterSet`] — tagged slot values
//! - [`ToolHandler`] — the computation behind a tool (infrastructure)
//! - [`DispatchOutcome`] — what a dispatch reports back

pub mod entities;
pub mod registry;
pub mod traits;
pub mod value;
pub mod value_objects;

pub use entities::{DefaultValue, OptionalParam, ToolSpec};
pub use registry::ToolRegistry;
pub use traits::ToolHandler;
pub use value::{ArtifactHandle, ParameterSet, Value};
pub use value_objects::{DispatchOutcome, HandlerError};
