//! Pattern matchers that pull typed values out of raw request text.
//!
//! All functions expect lower-cased input (see [`super::normalize`]) and
//! never fail: a match that does not parse is skipped, so the caller simply
//! sees fewer values.

use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("number pattern is valid"));

/// Frequency patterns, tried in order; the first with any match wins.
static FREQUENCY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        r"([0-9]+(?:\.[0-9]+)?)\s*hz",
        r"frequency\s*(?:of|is|=)?\s*([0-9]+(?:\.[0-9]+)?)",
        r"([0-9]+(?:\.[0-9]+)?)\s*hertz",
        r"freq\s*(?:of|is|=)?\s*([0-9]+(?:\.[0-9]+)?)",
    ])
});

/// Bracketed velocity arrays, tried in order.
static VELOCITY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        r"velocity\s*(?:of|is|=)?\s*\[([^\]]+)\]",
        r"vp\s*(?:of|is|=)?\s*\[([^\]]+)\]",
        r"velocities?\s*(?:of|is|=)?\s*\[([^\]]+)\]",
        r"v\s*=\s*\[([^\]]+)\]",
    ])
});

pub const FREQUENCY_WORDS: &[&str] = &["frequency", "freq", "hz", "hertz"];
pub const VELOCITY_WORDS: &[&str] = &["velocity", "vp", "speed"];

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("slot pattern is valid"))
        .collect()
}

fn mentions_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// Every number in the text, left to right.
pub fn extract_numbers(text: &str) -> Vec<f64> {
    NUMBER
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Frequency values stated in the text.
///
/// Falls back to every number in the text when no frequency pattern matches
/// but a frequency word is present. Downstream only the first value is used.
pub fn extract_frequencies(text: &str) -> Vec<f64> {
    for pattern in FREQUENCY_PATTERNS.iter() {
        let values: Vec<f64> = pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
            .collect();
        if !values.is_empty() {
            return values;
        }
    }

    if mentions_any(text, FREQUENCY_WORDS) {
        return extract_numbers(text);
    }

    Vec::new()
}

/// Velocity array stated in the text.
///
/// A bracketed list whose items do not all parse is skipped and the next
/// pattern is tried. Without any bracketed list, bare numbers are used when a
/// velocity word is present and there is more than one of them.
pub fn extract_velocities(text: &str) -> Vec<f64> {
    for pattern in VELOCITY_PATTERNS.iter() {
        let Some(list) = pattern.captures(text).and_then(|caps| caps.get(1)) else {
            continue;
        };
        let parsed: Result<Vec<f64>, _> = list
            .as_str()
            .split(',')
            .map(|item| item.trim().parse::<f64>())
            .collect();
        if let Ok(values) = parsed {
            return values;
        }
    }

    if mentions_any(text, VELOCITY_WORDS) {
        let numbers = extract_numbers(text);
        if numbers.len() > 1 {
            return numbers;
        }
    }

    Vec::new()
}

/// First number in the text lying inside `range`, if any trigger word occurs.
pub fn first_in_range(text: &str, triggers: &[String], range: &RangeInclusive<f64>) -> Option<f64> {
    if !triggers.iter().any(|t| text.contains(t.as_str())) {
        return None;
    }
    extract_numbers(text).into_iter().find(|n| range.contains(n))
}
