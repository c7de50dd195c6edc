//! Error types for the grading harness

use thiserror::Error;

/// Result alias for harness-level operations (session setup, report I/O).
pub type HarnessResult<T> = std::result::Result<T, HarnessError>;

/// Result alias for case bodies and page operations.
pub type CaseResult<T> = std::result::Result<T, CaseError>;

/// Failures that cross case boundaries.
///
/// `Session` is group-fatal: every case in the affected group is recorded
/// as an error and the runner moves on to the next group. `Io` and `Json`
/// at discovery/serialization time are fatal to the whole run.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("browser session error: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures scoped to a single case execution.
///
/// An `Assertion` means an expected condition did not hold and becomes a
/// `fail` outcome; an `Execution` is an unexpected condition (selector never
/// resolved, script threw, request failed) and becomes an `error` outcome.
/// Neither propagates past the case that produced it.
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("{0}")]
    Assertion(String),

    #[error("{0}")]
    Execution(String),
}

impl CaseError {
    /// An expected condition did not hold.
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion(message.into())
    }

    /// An unexpected condition interrupted the case.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_error_messages_are_verbatim() {
        let err = CaseError::assertion("Form should be visible");
        assert_eq!(err.to_string(), "Form should be visible");

        let err = CaseError::execution("selector never matched");
        assert_eq!(err.to_string(), "selector never matched");
    }

    #[test]
    fn test_harness_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = HarnessError::from(io);
        assert!(matches!(err, HarnessError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }
}
