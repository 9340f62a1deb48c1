//! Tool domain value objects: handler failures and dispatch outcomes
//!
//! A handler either returns a result [`ParameterSet`] or a [`HandlerError`].
//! The dispatcher folds that, together with its own validation, into a
//! [`DispatchOutcome`], which is the only thing a turn ever reports upward.

use super::value::ParameterSet;
use thiserror::Error;

/// Failure raised by a tool handler.
///
/// The message is surfaced to the user verbatim, so it should read as a
/// plain sentence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// A parameter had the wrong shape or an out-of-range value
    #[error("{0}")]
    InvalidArgument(String),

    /// The underlying computation or I/O failed
    #[error("{0}")]
    Execution(String),
}

impl HandlerError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Missing or mistyped parameter `name`, expected to be `expected`
    pub fn wrong_type(name: &str, expected: &str) -> Self {
        Self::InvalidArgument(format!("parameter '{}' must be a {}", name, expected))
    }

    pub fn message(&self) -> &str {
        match self {
            HandlerError::InvalidArgument(m) | HandlerError::Execution(m) => m,
        }
    }
}

/// Result of routing one request to one tool.
///
/// | Variant | Handler invoked? | Context updated? |
/// |---------|:---:|:---:|
/// | `Ok` | yes | yes (by the caller) |
/// | `MissingParams` | no | no |
/// | `ExecutionError` | yes | no |
/// | `UnrecognizedIntent` | no | no |
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The handler ran and produced these fields
    Ok(ParameterSet),
    /// Required slots that could not be filled, in declared order
    MissingParams(Vec<String>),
    /// The handler failed; the message is carried verbatim
    ExecutionError(String),
    /// No tool matched; carries a clarification hint for the user
    UnrecognizedIntent(String),
}

impl DispatchOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, DispatchOutcome::Ok(_))
    }

    pub fn result(&self) -> Option<&ParameterSet> {
        match self {
            DispatchOutcome::Ok(result) => Some(result),
            _ => None,
        }
    }

    /// Short label used in logs and transcripts
    pub fn label(&self) -> &'static str {
        match self {
            DispatchOutcome::Ok(_) => "ok",
            DispatchOutcome::MissingParams(_) => "missing_params",
            DispatchOutcome::ExecutionError(_) => "execution_error",
            DispatchOutcome::UnrecognizedIntent(_) => "unrecognized_intent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_message_is_verbatim() {
        let err = HandlerError::execution("list index out of range");
        assert_eq!(err.to_string(), "list index out of range");
        assert_eq!(err.message(), "list index out of range");

        let err = HandlerError::wrong_type("vp", "sequence of numbers");
        assert_eq!(err.message(), "parameter 'vp' must be a sequence of numbers");
    }

    #[test]
    fn test_dispatch_outcome_accessors() {
        let ok = DispatchOutcome::Ok(ParameterSet::new().with("x", 1.0));
        assert!(ok.is_ok());
        assert_eq!(ok.result().and_then(|r| r.number("x")), Some(1.0));
        assert_eq!(ok.label(), "ok");

        let missing = DispatchOutcome::MissingParams(vec!["frequency".to_string()]);
        assert!(!missing.is_ok());
        assert!(missing.result().is_none());
        assert_eq!(missing.label(), "missing_params");
    }
}
