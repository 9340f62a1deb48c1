//! Intent classification
//!
//! Scores every registered tool by how many of its keywords occur in the
//! request and picks the best one:
//!
//! - a keyword counts once if it occurs anywhere as a substring
//! - the strictly highest nonzero score wins
//! - ties go to the tool registered first
//! - an all-zero board means the request is unrecognized

use crate::tool::{ToolRegistry, ToolSpec};

/// Clarification returned when no tool matches.
pub const UNRECOGNIZED_HINT: &str = "I couldn't understand what seismic modeling operation you'd like to perform. Try asking about creating a ricker wavelet, plotting wavelets, or computing reflectivity.";

/// The tool a request is judged to ask for.
#[derive(Debug, Clone, Copy)]
pub struct ParsedIntent<'a> {
    pub tool: Option<&'a ToolSpec>,
    /// Keyword hits of the selected tool (0 when unrecognized)
    pub confidence: u32,
}

impl<'a> ParsedIntent<'a> {
    pub fn unrecognized() -> Self {
        Self {
            tool: None,
            confidence: 0,
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.tool.is_some()
    }

    pub fn tool_name(&self) -> Option<&'a str> {
        self.tool.map(|t| t.name.as_str())
    }
}

/// Keyword-overlap intent classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    /// Classify lower-cased request text against the registry.
    pub fn classify<'a>(&self, registry: &'a ToolRegistry, text: &str) -> ParsedIntent<'a> {
        let mut best = ParsedIntent::unrecognized();
        for tool in registry.all() {
            let score = tool.keyword_score(text);
            if score > best.confidence {
                best = ParsedIntent {
                    tool: Some(tool),
                    confidence: score,
                };
            }
        }
        best
    }

    /// Per-tool scores in registration order, for diagnostics
    pub fn scores<'a>(&self, registry: &'a ToolRegistry, text: &str) -> Vec<(&'a str, u32)> {
        registry
            .all()
            .map(|tool| (tool.name.as_str(), tool.keyword_score(text)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::{HandlerError, ParameterSet};

    fn noop(_: &ParameterSet) -> Result<ParameterSet, HandlerError> {
        Ok(ParameterSet::new())
    }

    fn registry() -> ToolRegistry {
        ToolRegistry::new()
            .register(
                ToolSpec::new("make_ricker", "", noop)
                    .with_keywords(["ricker", "wavelet", "create", "make", "generate"]),
            )
            .register(
                ToolSpec::new("plot_ricker", "", noop)
                    .with_keywords(["plot", "show", "visualize", "display", "graph", "chart"]),
            )
            .register(ToolSpec::new("compute_reflectivity", "", noop).with_keywords([
                "reflectivity",
                "reflection",
                "coefficient",
                "velocity",
                "density",
                "impedance",
            ]))
    }

    #[test]
    fn test_classify_selects_highest_score() {
        let registry = registry();
        let intent = IntentClassifier.classify(&registry, "create a 25 hz ricker wavelet");
        assert_eq!(intent.tool_name(), Some("make_ricker"));
        assert_eq!(intent.confidence, 3);

        let intent = IntentClassifier.classify(&registry, "plot it");
        assert_eq!(intent.tool_name(), Some("plot_ricker"));
        assert_eq!(intent.confidence, 1);
    }

    #[test]
    fn test_classify_tie_goes_to_first_registered() {
        let registry = registry();
        // "ricker" (make_ricker) vs "plot" (plot_ricker): one hit each
        let intent = IntentClassifier.classify(&registry, "plot ricker");
        assert_eq!(intent.tool_name(), Some("make_ricker"));
        assert_eq!(intent.confidence, 1);
    }

    #[test]
    fn test_classify_unrecognized() {
        let registry = registry();
        let intent = IntentClassifier.classify(&registry, "asdkjh random gibberish");
        assert!(!intent.is_recognized());
        assert_eq!(intent.confidence, 0);
        assert!(
            IntentClassifier
                .scores(&registry, "asdkjh random gibberish")
                .iter()
                .all(|(_, s)| *s == 0)
        );
    }

    #[test]
    fn test_classify_no_stemming() {
        let registry = registry();
        // "velocities" does not contain "velocity"
        let scores = IntentClassifier.scores(&registry, "velocities");
        assert_eq!(scores[2], ("compute_reflectivity", 0));
    }

    #[test]
    fn test_classify_is_deterministic() {
        let registry = registry();
        let text = "show me a ricker wavelet plot";
        let first = IntentClassifier.classify(&registry, text).tool_name();
        for _ in 0..10 {
            assert_eq!(IntentClassifier.classify(&registry, text).tool_name(), first);
        }
    }
}
