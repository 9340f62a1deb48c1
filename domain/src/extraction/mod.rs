//! Slot extraction
//!
//! Turns free text into typed slot values. Two layers:
//!
//! - [`patterns`] — the raw matchers (numbers, frequencies, velocity arrays,
//!   range-disambiguated numbers)
//! - [`rules`] — per-tool tables binding slot names to matchers
//!
//! Extraction is lenient by construction: a malformed match is dropped and
//! the slot stays unset, leaving the dispatcher to report it as missing.

pub mod patterns;
pub mod rules;

pub use patterns::{extract_frequencies, extract_numbers, extract_velocities, first_in_range};
pub use rules::{SlotExtractor, SlotRule};

/// Canonical form of request text used by classification and extraction
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Create a 25 Hz Ricker  "), "create a 25 hz ricker");
    }
}
