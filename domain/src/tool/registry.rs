//! Tool Registry
//!
//! Ordered catalog of [`ToolSpec`]s. Registration order is significant: the
//! intent classifier breaks score ties in favour of the tool registered
//! first, so [`ToolRegistry::all`] always yields tools in that order.
//!
//! ```
//! use seismic_domain::tool::{HandlerError, ParameterSet, ToolRegistry, ToolSpec};
//!
//! fn echo(params: &ParameterSet) -> Result<ParameterSet, HandlerError> {
//!     Ok(params.clone())
//! }
//!
//! let registry = ToolRegistry::new()
//!     .register(ToolSpec::new("echo", "Echo", echo))
//!     .register(ToolSpec::new("noop", "Nothing", echo));
//!
//! assert_eq!(registry.names().collect::<Vec<_>>(), vec!["echo", "noop"]);
//! assert!(registry.lookup("missing").is_err());
//! ```

use super::entities::ToolSpec;
use crate::core::error::DomainError;
use crate::extraction::SlotExtractor;

/// Catalog of invocable tools, read-only after startup.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolSpec>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool (builder pattern).
    ///
    /// Registering a name twice replaces the earlier spec but keeps its
    /// position in the order.
    pub fn register(mut self, tool: ToolSpec) -> Self {
        match self.tools.iter_mut().find(|t| t.name == tool.name) {
            Some(existing) => *existing = tool,
            None => self.tools.push(tool),
        }
        self
    }

    /// Look up a tool by exact name
    pub fn lookup(&self, name: &str) -> Result<&ToolSpec, DomainError> {
        self.get(name)
            .ok_or_else(|| DomainError::ToolNotFound(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All tools in registration order
    pub fn all(&self) -> impl Iterator<Item = &ToolSpec> {
        self.tools.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Check that every context slot names a registered producer
    pub fn validate(&self) -> Result<(), DomainError> {
        for tool in &self.tools {
            for rule in &tool.slots {
                if let SlotExtractor::FromContext { producer, .. } = &rule.extractor
                    && !self.contains(producer)
                {
                    return Err(DomainError::UnknownProducer {
                        tool: tool.name.clone(),
                        producer: producer.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::SlotRule;
    use crate::tool::value::ParameterSet;
    use crate::tool::value_objects::HandlerError;

    fn noop(_: &ParameterSet) -> Result<ParameterSet, HandlerError> {
        Ok(ParameterSet::new())
    }

    #[test]
    fn test_registry_lookup() {
        let registry = ToolRegistry::new()
            .register(ToolSpec::new("make_ricker", "Ricker", noop))
            .register(ToolSpec::new("plot_ricker", "Plot", noop));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup("plot_ricker").unwrap().name, "plot_ricker");
        assert!(registry.contains("make_ricker"));
    }

    #[test]
    fn test_registry_unknown_tool() {
        let registry = ToolRegistry::new().register(ToolSpec::new("make_ricker", "", noop));

        let err = registry.lookup("unknown_tool").unwrap_err();
        assert!(matches!(err, DomainError::ToolNotFound(ref n) if n == "unknown_tool"));
        assert_eq!(err.to_string(), "Tool not found: unknown_tool");
    }

    #[test]
    fn test_registry_validate_producers() {
        let plot = ToolSpec::new("plot_ricker", "", noop)
            .with_slot(SlotRule::from_context("wavelet", &["time"], "make_ricker"));

        let incomplete = ToolRegistry::new().register(plot.clone());
        assert_eq!(
            incomplete.validate(),
            Err(DomainError::UnknownProducer {
                tool: "plot_ricker".to_string(),
                producer: "make_ricker".to_string(),
            })
        );

        let complete = incomplete.register(ToolSpec::new("make_ricker", "", noop));
        assert!(complete.validate().is_ok());
    }

    #[test]
    fn test_registry_preserves_order_on_replace() {
        let registry = ToolRegistry::new()
            .register(ToolSpec::new("a", "first", noop))
            .register(ToolSpec::new("b", "second", noop))
            .register(ToolSpec::new("a", "replaced", noop));

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(registry.lookup("a").unwrap().description, "replaced");
    }
}
