//! Weighted test cases and their outcomes

use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CaseError, CaseResult};
use crate::session::BrowserSession;

/// Controls whether a case's result appears in the learner-facing subset of
/// the report. Serialized with the tags the grading platform expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Visible,
    Hidden,
    AfterPublished,
    AfterDueDate,
}

impl Visibility {
    /// The platform tag for this visibility level.
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Visible => "visible",
            Visibility::Hidden => "hidden",
            Visibility::AfterPublished => "after_published",
            Visibility::AfterDueDate => "after_due_date",
        }
    }
}

/// Terminal status of one case execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pass,
    Fail,
    Error,
}

/// The result of executing one case. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub status: Status,
    pub message: Option<String>,
    pub elapsed: Duration,
}

impl Outcome {
    pub fn pass(elapsed: Duration) -> Self {
        Self { status: Status::Pass, message: None, elapsed }
    }

    pub fn fail(message: impl Into<String>, elapsed: Duration) -> Self {
        Self { status: Status::Fail, message: Some(message.into()), elapsed }
    }

    pub fn error(message: impl Into<String>, elapsed: Duration) -> Self {
        Self { status: Status::Error, message: Some(message.into()), elapsed }
    }

    /// Human-readable status line for the report.
    pub fn output(&self) -> String {
        match self.status {
            Status::Pass => "passed".to_string(),
            Status::Fail => self
                .message
                .clone()
                .unwrap_or_else(|| "assertion failed".to_string()),
            Status::Error => format!(
                "error: {}",
                self.message.as_deref().unwrap_or("unknown cause")
            ),
        }
    }
}

/// A case body: borrows the group's session for the duration of one check.
pub type CaseBody = for<'a> fn(&'a BrowserSession) -> BoxFuture<'a, CaseResult<()>>;

/// One named, weighted check against the current page state.
///
/// Metadata (weight, visibility) never influences execution; it only
/// controls score contribution and report filtering.
pub struct TestCase {
    /// Identifier, unique within its group.
    pub id: &'static str,
    /// Learner-facing name shown in the report.
    pub name: &'static str,
    /// Score contributed when the case passes.
    pub weight: f64,
    pub visibility: Visibility,
    run: CaseBody,
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("weight", &self.weight)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

impl TestCase {
    pub fn new(id: &'static str, name: &'static str, weight: f64, run: CaseBody) -> Self {
        Self {
            id,
            name,
            weight,
            visibility: Visibility::Visible,
            run,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Run the case body, converting every way it can end into an Outcome.
    ///
    /// Assertion failures become `fail`, execution errors become `error`,
    /// and a panicking body is caught so sibling cases still run and the
    /// session still closes.
    pub async fn execute(&self, session: &BrowserSession) -> Outcome {
        debug!("executing case {}", self.id);
        let start = Instant::now();
        let result = AssertUnwindSafe((self.run)(session)).catch_unwind().await;
        let elapsed = start.elapsed();

        match result {
            Ok(Ok(())) => Outcome::pass(elapsed),
            Ok(Err(CaseError::Assertion(message))) => Outcome::fail(message, elapsed),
            Ok(Err(CaseError::Execution(message))) => Outcome::error(message, elapsed),
            Err(payload) => Outcome::error(panic_message(payload.as_ref()), elapsed),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("case panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("case panicked: {message}")
    } else {
        "case panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_tags() {
        assert_eq!(Visibility::Visible.as_str(), "visible");
        assert_eq!(Visibility::Hidden.as_str(), "hidden");
        assert_eq!(Visibility::AfterPublished.as_str(), "after_published");
        assert_eq!(Visibility::AfterDueDate.as_str(), "after_due_date");
    }

    #[test]
    fn test_visibility_serde_round_trip() {
        let json = serde_json::to_string(&Visibility::AfterDueDate).unwrap();
        assert_eq!(json, "\"after_due_date\"");
        let back: Visibility = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Visibility::AfterDueDate);
    }

    #[test]
    fn test_outcome_output_lines() {
        let pass = Outcome::pass(Duration::from_millis(10));
        assert_eq!(pass.output(), "passed");
        assert!(pass.message.is_none());

        let fail = Outcome::fail("Form should have exactly 3 labels", Duration::ZERO);
        assert_eq!(fail.output(), "Form should have exactly 3 labels");

        let error = Outcome::error("selector never matched", Duration::ZERO);
        assert_eq!(error.output(), "error: selector never matched");
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "case panicked: boom");

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("boom"));
        assert_eq!(panic_message(payload.as_ref()), "case panicked: boom");

        let payload: Box<dyn std::any::Any + Send> = Box::new(42_u32);
        assert_eq!(panic_message(payload.as_ref()), "case panicked");
    }

    #[test]
    fn test_case_metadata_defaults() {
        fn noop(_session: &BrowserSession) -> futures::future::BoxFuture<'_, CaseResult<()>> {
            Box::pin(async { Ok(()) })
        }

        let case = TestCase::new("form_structure", "Form structure", 3.0, noop);
        assert_eq!(case.visibility, Visibility::Visible);
        let case = case.with_visibility(Visibility::AfterDueDate);
        assert_eq!(case.visibility, Visibility::AfterDueDate);
        assert_eq!(case.weight, 3.0);
    }
}
