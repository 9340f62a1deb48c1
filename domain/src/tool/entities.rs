//! Tool domain entities

use super::traits::ToolHandler;
use super::value::Value;
use crate::extraction::SlotRule;
use std::fmt;
use std::sync::Arc;

/// Declared default of an optional parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Left absent when not supplied; the handler decides what to do
    NoDefault,
    /// Filled in by the dispatcher when not supplied
    Value(Value),
}

impl DefaultValue {
    pub fn value(&self) -> Option<&Value> {
        match self {
            DefaultValue::NoDefault => None,
            DefaultValue::Value(v) => Some(v),
        }
    }
}

/// Optional parameter with its declared default
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalParam {
    pub name: String,
    pub default: DefaultValue,
}

/// Specification of one invocable tool.
///
/// Immutable once registered. Carries everything the pipeline needs:
/// trigger keywords for classification, the parameter schema for dispatch,
/// slot rules for extraction, and the handler that does the work.
#[derive(Clone)]
pub struct ToolSpec {
    /// Unique name of the tool (e.g., "make_ricker")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Trigger keywords, unique, in declaration order
    pub keywords: Vec<String>,
    /// Required parameter names, in declaration order
    pub required: Vec<String>,
    /// Optional parameters with defaults, in declaration order
    pub optional: Vec<OptionalParam>,
    /// Slot extraction rules, applied in order
    pub slots: Vec<SlotRule>,
    handler: Arc<dyn ToolHandler>,
}

impl ToolSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: impl ToolHandler + 'static,
    ) -> Self {
        Self::with_shared_handler(name, description, Arc::new(handler))
    }

    pub fn with_shared_handler(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            keywords: Vec::new(),
            required: Vec::new(),
            optional: Vec::new(),
            slots: Vec::new(),
            handler,
        }
    }

    /// Add trigger keywords; duplicates are ignored
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for keyword in keywords {
            let keyword = keyword.into().to_lowercase();
            if !self.keywords.contains(&keyword) {
                self.keywords.push(keyword);
            }
        }
        self
    }

    pub fn require(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    pub fn optional(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.optional.push(OptionalParam {
            name: name.into(),
            default: DefaultValue::Value(default.into()),
        });
        self
    }

    pub fn optional_without_default(mut self, name: impl Into<String>) -> Self {
        self.optional.push(OptionalParam {
            name: name.into(),
            default: DefaultValue::NoDefault,
        });
        self
    }

    pub fn with_slot(mut self, rule: SlotRule) -> Self {
        self.slots.push(rule);
        self
    }

    pub fn handler(&self) -> &dyn ToolHandler {
        self.handler.as_ref()
    }

    /// Number of keywords occurring as substrings of `text`
    pub fn keyword_score(&self, text: &str) -> u32 {
        self.keywords
            .iter()
            .filter(|k| text.contains(k.as_str()))
            .count() as u32
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    pub fn default_for(&self, name: &str) -> Option<&Value> {
        self.optional
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.default.value())
    }
}

impl fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("keywords", &self.keywords)
            .field("required", &self.required)
            .field("optional", &self.optional)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}
