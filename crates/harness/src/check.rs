//! Assertion helpers for case bodies
//!
//! Each helper returns a `CaseError::Assertion` carrying the caller's
//! message, so a failed expectation becomes a `fail` outcome with a line
//! the learner can act on. A malformed pattern is the harness's own bug
//! and surfaces as an execution error instead.

use std::fmt::Debug;

use regex::Regex;

use crate::error::{CaseError, CaseResult};

/// Fail with `message` unless `condition` holds.
pub fn ensure(condition: bool, message: impl Into<String>) -> CaseResult<()> {
    if condition {
        Ok(())
    } else {
        Err(CaseError::assertion(message))
    }
}

/// Fail unless `actual == expected`, appending both values to the message.
pub fn ensure_eq<T: PartialEq + Debug>(
    actual: T,
    expected: T,
    message: impl Into<String>,
) -> CaseResult<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(CaseError::assertion(format!(
            "{} (expected {:?}, got {:?})",
            message.into(),
            expected,
            actual
        )))
    }
}

/// Fail unless `text` matches the anchored pattern.
pub fn ensure_matches(pattern: &str, text: &str, message: impl Into<String>) -> CaseResult<()> {
    let regex = Regex::new(pattern)
        .map_err(|e| CaseError::execution(format!("invalid pattern {pattern}: {e}")))?;
    if regex.is_match(text) {
        Ok(())
    } else {
        Err(CaseError::assertion(format!(
            "{} (got {:?})",
            message.into(),
            text
        )))
    }
}

/// Fail unless `haystack` contains `needle`.
pub fn ensure_contains(haystack: &str, needle: &str, message: impl Into<String>) -> CaseResult<()> {
    if haystack.contains(needle) {
        Ok(())
    } else {
        Err(CaseError::assertion(format!(
            "{} (got {:?})",
            message.into(),
            haystack
        )))
    }
}

/// Fail unless `low <= value <= high`.
pub fn ensure_in_range<T: PartialOrd + Debug>(
    value: T,
    low: T,
    high: T,
    message: impl Into<String>,
) -> CaseResult<()> {
    if value >= low && value <= high {
        Ok(())
    } else {
        Err(CaseError::assertion(format!(
            "{} (got {:?})",
            message.into(),
            value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_ensure() {
        assert!(ensure(true, "unused").is_ok());
        let err = ensure(false, "Form should be visible").unwrap_err();
        assert_eq!(err.to_string(), "Form should be visible");
        assert!(matches!(err, CaseError::Assertion(_)));
    }

    #[test]
    fn test_ensure_eq_reports_both_values() {
        assert!(ensure_eq(3, 3, "count").is_ok());
        let err = ensure_eq(2, 3, "Form should have exactly 3 labels").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Form should have exactly 3 labels (expected 3, got 2)"
        );
    }

    #[test_case(r"^Score: \d+$", "Score: 0", true; "score line")]
    #[test_case(r"^Score: \d+$", "Score: abc", false; "score with letters")]
    #[test_case(r"^Time: \d+ secs$", "Time: 42 secs", true; "time line")]
    #[test_case(r"^Time: \d+ secs$", "Time: 42", false; "time without unit")]
    fn test_ensure_matches(pattern: &str, text: &str, matches: bool) {
        assert_eq!(ensure_matches(pattern, text, "format").is_ok(), matches);
    }

    #[test]
    fn test_ensure_matches_bad_pattern_is_execution_error() {
        let err = ensure_matches("(", "anything", "format").unwrap_err();
        assert!(matches!(err, CaseError::Execution(_)));
    }

    #[test]
    fn test_ensure_contains() {
        assert!(ensure_contains("240px 240px 240px", "240px", "grid").is_ok());
        let err = ensure_contains("none", "240px", "Grid should have 240px columns").unwrap_err();
        assert!(err.to_string().starts_with("Grid should have 240px columns"));
    }

    #[test_case(200, 100, 300, true; "inside")]
    #[test_case(100, 100, 300, true; "lower bound")]
    #[test_case(300, 100, 300, true; "upper bound")]
    #[test_case(99, 100, 300, false; "below")]
    #[test_case(301, 100, 300, false; "above")]
    fn test_ensure_in_range(value: i64, low: i64, high: i64, ok: bool) {
        assert_eq!(ensure_in_range(value, low, high, "dimension").is_ok(), ok);
    }
}
