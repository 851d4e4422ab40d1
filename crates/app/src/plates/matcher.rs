//! Fuzzy plate matching tolerant of OCR character errors.

use crate::plates::normalize;

/// Shortest normalized reading accepted for containment matching.
const CONTAINMENT_MIN_LEN: usize = 6;

/// Minimum positional similarity accepted as a match, in percent.
const SIMILARITY_THRESHOLD: f64 = 70.0;

/// Score a detected plate reading against one authorized plate.
///
/// Returns `Some(score)` when the pair matches, `None` otherwise. Rules are
/// evaluated in a fixed precedence order and the first satisfied rule
/// determines the final score:
///
/// 1. Exact equality after normalisation scores 100.
/// 2. A detected reading of at least six characters contained in the
///    authorized plate scores 80 (OCR dropped leading/trailing characters).
/// 3. The authorized plate, at least six characters, contained in the
///    detected reading scores 80 (OCR picked up extra characters).
/// 4. Position-by-position similarity of at least 70% scores that
///    percentage (OCR substituted individual characters).
#[must_use]
pub fn fuzzy_match(detected: &str, authorized: &str) -> Option<f64> {
    let detected = normalize(detected);
    let authorized = normalize(authorized);

    if detected == authorized {
        return Some(100.0);
    }

    if detected.len() >= CONTAINMENT_MIN_LEN && authorized.contains(&detected) {
        return Some(80.0);
    }

    if authorized.len() >= CONTAINMENT_MIN_LEN && detected.contains(&authorized) {
        return Some(80.0);
    }

    if !detected.is_empty() && !authorized.is_empty() {
        // Normalized plates are pure ASCII, so bytes compare per character.
        let matches = detected
            .bytes()
            .zip(authorized.bytes())
            .filter(|(a, b)| a == b)
            .count();
        let longest = detected.len().max(authorized.len());

        #[expect(clippy::cast_precision_loss, reason = "plate lengths are tiny")]
        let similarity = matches as f64 / longest as f64 * 100.0;

        if similarity >= SIMILARITY_THRESHOLD {
            return Some(similarity);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_scores_100() {
        assert_eq!(fuzzy_match("AB12CD", "AB12CD"), Some(100.0));
        assert_eq!(fuzzy_match("ab 12-cd", "AB12CD"), Some(100.0));
    }

    #[test]
    fn detected_contained_in_authorized_scores_80() {
        assert_eq!(fuzzy_match("AB12CD", "XXAB12CDYY"), Some(80.0));
    }

    #[test]
    fn authorized_contained_in_detected_scores_80() {
        assert_eq!(fuzzy_match("XXAB12CDYY", "AB12CD"), Some(80.0));
    }

    #[test]
    fn short_readings_are_not_matched_by_containment() {
        // Five characters: containment is skipped, positional similarity
        // against the longer plate stays under threshold.
        assert_eq!(fuzzy_match("AB12C", "XXAB12CYY"), None);
    }

    #[test]
    fn positional_similarity_above_threshold_matches() {
        // One substituted character: 6 of 7 positions agree.
        let score = fuzzy_match("AB12CD1", "AB12CX1").unwrap();

        assert!((score - 600.0 / 7.0).abs() < 1e-9, "got {score}");

        // Two substituted characters still clear the 70% threshold.
        let score = fuzzy_match("AB12CD1", "AB12XX1").unwrap();

        assert!((score - 500.0 / 7.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn length_mismatch_dilutes_similarity() {
        // Positions beyond the shorter string never match; the divisor is
        // the longer length.
        assert_eq!(fuzzy_match("AB1", "AB12CD"), None);
    }

    #[test]
    fn positional_similarity_below_threshold_is_no_match() {
        assert_eq!(fuzzy_match("ZZZZZZ", "AB12CD"), None);
    }

    #[test]
    fn first_satisfied_rule_wins() {
        // Containment (80) applies even though positional similarity would
        // also pass with a different score (6/8 = 75).
        assert_eq!(fuzzy_match("AB12CD", "AB12CDXX"), Some(80.0));
    }

    #[test]
    fn empty_pair_is_an_exact_match() {
        // Literal rule precedence: two empty normalized strings are equal.
        assert_eq!(fuzzy_match("", ""), Some(100.0));
        assert_eq!(fuzzy_match("---", "  "), Some(100.0));
    }

    #[test]
    fn empty_against_non_empty_is_no_match() {
        assert_eq!(fuzzy_match("", "AB12CD"), None);
        assert_eq!(fuzzy_match("AB12CD", ""), None);
    }
}
