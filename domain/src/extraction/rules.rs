//! Slot rule tables
//!
//! Each tool declares an ordered list of [`SlotRule`]s saying which
//! extractor fills which slot. Adding a tool never requires new branching
//! in the pipeline: it only needs a rule table.

use super::patterns::{extract_frequencies, extract_velocities, first_in_range};
use crate::tool::value::Value;
use std::ops::RangeInclusive;

/// How a slot gets its value.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotExtractor {
    /// First frequency stated in the text
    Frequency,
    /// Bracketed or bare list of velocities
    VelocityArray,
    /// First number inside `range`, only when a trigger word is present
    RangedNumber {
        triggers: Vec<String>,
        range: RangeInclusive<f64>,
        /// Truncate the value to a whole number
        integer: bool,
    },
    /// Reuse an artifact from an earlier turn, producing it on demand
    FromContext {
        /// Further context keys copied alongside the slot when present
        companions: Vec<String>,
        /// Tool that produces the slot when the context lacks it
        producer: String,
    },
}

/// Binds one slot name to one extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotRule {
    pub slot: String,
    pub extractor: SlotExtractor,
}

impl SlotRule {
    pub fn new(slot: impl Into<String>, extractor: SlotExtractor) -> Self {
        Self {
            slot: slot.into(),
            extractor,
        }
    }

    pub fn frequency(slot: impl Into<String>) -> Self {
        Self::new(slot, SlotExtractor::Frequency)
    }

    pub fn velocity_array(slot: impl Into<String>) -> Self {
        Self::new(slot, SlotExtractor::VelocityArray)
    }

    pub fn ranged(
        slot: impl Into<String>,
        triggers: &[&str],
        range: RangeInclusive<f64>,
    ) -> Self {
        Self::new(
            slot,
            SlotExtractor::RangedNumber {
                triggers: triggers.iter().map(|t| t.to_string()).collect(),
                range,
                integer: false,
            },
        )
    }

    pub fn ranged_integer(
        slot: impl Into<String>,
        triggers: &[&str],
        range: RangeInclusive<f64>,
    ) -> Self {
        Self::new(
            slot,
            SlotExtractor::RangedNumber {
                triggers: triggers.iter().map(|t| t.to_string()).collect(),
                range,
                integer: true,
            },
        )
    }

    pub fn from_context(
        slot: impl Into<String>,
        companions: &[&str],
        producer: impl Into<String>,
    ) -> Self {
        Self::new(
            slot,
            SlotExtractor::FromContext {
                companions: companions.iter().map(|c| c.to_string()).collect(),
                producer: producer.into(),
            },
        )
    }

    /// Whether this rule reads conversation context rather than text
    pub fn is_contextual(&self) -> bool {
        matches!(self.extractor, SlotExtractor::FromContext { .. })
    }

    /// Extract the slot from lower-cased text.
    ///
    /// Always `None` for [`SlotExtractor::FromContext`]; context rules are
    /// resolved by the turn pipeline, which owns the session state.
    pub fn extract(&self, text: &str) -> Option<Value> {
        match &self.extractor {
            SlotExtractor::Frequency => extract_frequencies(text).first().copied().map(Value::Number),
            SlotExtractor::VelocityArray => {
                let velocities = extract_velocities(text);
                (!velocities.is_empty()).then_some(Value::Sequence(velocities))
            }
            SlotExtractor::RangedNumber {
                triggers,
                range,
                integer,
            } => first_in_range(text, triggers, range)
                .map(|n| if *integer { n.trunc() } else { n })
                .map(Value::Number),
            SlotExtractor::FromContext { .. } => None,
        }
    }
}
