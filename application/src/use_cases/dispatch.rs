//! Dispatcher: validates, default-fills and invokes a tool.
//!
//! ```text
//! dispatch(tool, params)
//!   1. required − keys(params) ≠ ∅  → MissingParams (handler not invoked)
//!   2. fill absent optionals that declare a default
//!   3. handler.invoke(params)
//!        Ok(result)  → Ok(result)
//!        Err(e)      → ExecutionError("Error executing {tool}: {e}")
//! ```
//!
//! The dispatcher holds no state. Merging a result into the conversation
//! context is the caller's job.

use seismic_domain::{DispatchOutcome, ParameterSet, ToolSpec};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// Stateless tool dispatcher
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher;

impl Dispatcher {
    /// Required parameters of `tool` absent from `params`, in declared order
    pub fn missing_params(tool: &ToolSpec, params: &ParameterSet) -> Vec<String> {
        tool.required
            .iter()
            .filter(|name| !params.contains(name))
            .cloned()
            .collect()
    }

    /// Fill every absent optional parameter that declares a default
    pub fn fill_defaults(tool: &ToolSpec, params: &mut ParameterSet) {
        for optional in &tool.optional {
            if params.contains(&optional.name) {
                continue;
            }
            if let Some(default) = optional.default.value() {
                params.insert(optional.name.clone(), default.clone());
            }
        }
    }

    /// Dispatch `params` to `tool`.
    ///
    /// Defaults are written into `params`, so after the call it holds the
    /// values the handler actually saw.
    pub fn dispatch(&self, tool: &ToolSpec, params: &mut ParameterSet) -> DispatchOutcome {
        let missing = Self::missing_params(tool, params);
        if !missing.is_empty() {
            debug!(tool = %tool.name, ?missing, "Missing required parameters");
            return DispatchOutcome::MissingParams(missing);
        }

        Self::fill_defaults(tool, params);

        let invoked = panic::catch_unwind(AssertUnwindSafe(|| tool.handler().invoke(params)));
        match invoked {
            Ok(Ok(result)) => {
                debug!(tool = %tool.name, fields = result.len(), "Tool executed");
                DispatchOutcome::Ok(result)
            }
            Ok(Err(e)) => {
                warn!(tool = %tool.name, error = %e, "Tool execution failed");
                DispatchOutcome::ExecutionError(format!("Error executing {}: {}", tool.name, e))
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(tool = %tool.name, error = %message, "Tool handler panicked");
                DispatchOutcome::ExecutionError(format!(
                    "Error executing {}: {}",
                    tool.name, message
                ))
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
