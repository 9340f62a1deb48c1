//! Conversation context: memory that spans the turns of one chat session.
//!
//! Every successful tool result is merged into the context, so a later turn
//! can omit parameters an earlier turn produced ("plot it" reuses the
//! wavelet from "create a 30 Hz Ricker wavelet").
//!
//! Keys are tool-result field names and are not namespaced per tool: when two
//! tools emit the same field, the later result overwrites the earlier one.
//! [`ConversationContext::merge`] reports which keys were overwritten so the
//! caller can log it.
//!
//! One context belongs to exactly one session. It is passed by `&mut` into
//! each turn; nothing in this crate holds a shared instance.

use crate::tool::value::{ParameterSet, Value};
use serde::{Deserialize, Serialize};

/// One completed exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub user: String,
    pub assistant: String,
}

/// Per-session key/value memory plus the turn transcript.
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    values: ParameterSet,
    turns: Vec<Turn>,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains(key)
    }

    pub fn values(&self) -> &ParameterSet {
        &self.values
    }

    /// Merge a tool result into the context.
    ///
    /// Returns the keys whose previous value was replaced.
    pub fn merge(&mut self, result: &ParameterSet) -> Vec<String> {
        let mut overwritten = Vec::new();
        for (key, value) in result.iter() {
            if self.values.insert(key, value.clone()).is_some() {
                overwritten.push(key.to_string());
            }
        }
        overwritten
    }

    pub fn record_turn(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.turns.push(Turn {
            user: user.into(),
            assistant: assistant.into(),
        });
    }

    /// Prior turns, oldest first
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Forget all values and turns
    pub fn clear(&mut self) {
        self.values.clear();
        self.turns.clear();
    }
}
