//! Tagged parameter values passed into and out of tool handlers.
//!
//! Every slot a tool accepts or a field it returns is one of three shapes:
//!
//! | Variant | Example slots |
//! |---------|---------------|
//! | [`Value::Number`] | `frequency`, `dt`, `n_samples` |
//! | [`Value::Sequence`] | `vp`, `wavelet`, `reflectivity` |
//! | [`Value::Artifact`] | `figure` |
//!
//! A [`ParameterSet`] is an ordered `name → Value` map. It is used both for
//! the arguments of a call and for the result a handler returns, so a result
//! can be merged straight into the conversation context.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque handle to rendered output (e.g. a figure written to disk).
///
/// The core never looks inside the artifact; it only carries the handle
/// between turns and lets the reply formatter reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactHandle {
    /// Unique identifier assigned by the renderer
    pub id: String,
    /// Location the UI can load the artifact from
    pub uri: String,
    /// MIME type (e.g. `image/svg+xml`)
    pub media_type: String,
    /// Human-readable title used as alt text
    pub title: String,
}

impl ArtifactHandle {
    pub fn new(
        id: impl Into<String>,
        uri: impl Into<String>,
        media_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            uri: uri.into(),
            media_type: media_type.into(),
            title: String::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// A single slot value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Sequence(Vec<f64>),
    Artifact(ArtifactHandle),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Sequence(_) => "sequence",
            Value::Artifact(_) => "artifact",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[f64]> {
        match self {
            Value::Sequence(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_artifact(&self) -> Option<&ArtifactHandle> {
        match self {
            Value::Artifact(handle) => Some(handle),
            _ => None,
        }
    }

    /// Interpret a number as a non-negative integer index.
    ///
    /// Returns `None` for negative, fractional, or non-finite numbers.
    pub fn as_index(&self) -> Option<usize> {
        self.as_number().and_then(number_to_index)
    }

    /// Interpret a sequence as a list of non-negative integer indices.
    pub fn as_indices(&self) -> Option<Vec<usize>> {
        self.as_sequence()?
            .iter()
            .map(|n| number_to_index(*n))
            .collect()
    }
}

fn number_to_index(n: f64) -> Option<usize> {
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 {
        Some(n as usize)
    } else {
        None
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{:?}", n),
            Value::Sequence(values) => write!(f, "{:?}", values),
            Value::Artifact(handle) => write!(f, "<artifact {}>", handle.id),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<Vec<f64>> for Value {
    fn from(values: Vec<f64>) -> Self {
        Value::Sequence(values)
    }
}

impl From<&[f64]> for Value {
    fn from(values: &[f64]) -> Self {
        Value::Sequence(values.to_vec())
    }
}

impl From<ArtifactHandle> for Value {
    fn from(handle: ArtifactHandle) -> Self {
        Value::Artifact(handle)
    }
}

/// Ordered mapping of slot names to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, Value>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a value, returning the one it replaced (if any)
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_number)
    }

    pub fn sequence(&self, name: &str) -> Option<&[f64]> {
        self.get(name).and_then(Value::as_sequence)
    }

    pub fn artifact(&self, name: &str) -> Option<&ArtifactHandle> {
        self.get(name).and_then(Value::as_artifact)
    }

    /// First artifact among the values, in key order
    pub fn first_artifact(&self) -> Option<&ArtifactHandle> {
        self.values.values().find_map(Value::as_artifact)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = ParameterSet::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl IntoIterator for ParameterSet {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
