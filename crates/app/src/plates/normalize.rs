//! Plate text canonicalisation.

/// Canonicalise raw plate text for comparison.
///
/// Uppercases the input and strips every character outside `A-Z0-9`, so
/// spacing, dashes, and case never affect matching.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter_map(|c| {
            let c = c.to_ascii_uppercase();
            (c.is_ascii_uppercase() || c.is_ascii_digit()).then_some(c)
        })
        .collect()
}
