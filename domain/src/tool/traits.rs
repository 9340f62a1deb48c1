//! Tool domain traits
//!
//! [`ToolHandler`] is the boundary to the actual computation behind a tool.
//! Concrete handlers (Ricker synthesis, reflectivity, figure rendering) live
//! in the infrastructure layer.

use super::value::ParameterSet;
use super::value_objects::HandlerError;

/// Executes a tool against a fully validated parameter set.
///
/// Handlers are synchronous and must report failure through the returned
/// `Result` rather than panicking. Parameters arrive with required slots
/// present and declared defaults already filled in.
pub trait ToolHandler: Send + Sync {
    fn invoke(&self, params: &ParameterSet) -> Result<ParameterSet, HandlerError>;
}

impl<F> ToolHandler for F
where
    F: Fn(&ParameterSet) -> Result<ParameterSet, HandlerError> + Send + Sync,
{
    fn invoke(&self, params: &ParameterSet) -> Result<ParameterSet, HandlerError> {
        self(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_handler() {
        let double = |params: &ParameterSet| -> Result<ParameterSet, HandlerError> {
            let x = params
                .number("x")
                .ok_or_else(|| HandlerError::wrong_type("x", "number"))?;
            Ok(ParameterSet::new().with("y", x * 2.0))
        };

        let out = double.invoke(&ParameterSet::new().with("x", 21.0)).unwrap();
        assert_eq!(out.number("y"), Some(42.0));

        let err = double.invoke(&ParameterSet::new()).unwrap_err();
        assert!(err.message().contains("'x'"));
    }
}
