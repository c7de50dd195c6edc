//! Test groups: ordered cases sharing one browser session

use crate::case::TestCase;
use crate::session::Viewport;

/// An ordered collection of cases that share one browser session and reset
/// to the same page before each case.
///
/// Case order is the declaration order of the `cases` vector; group order in
/// a run is decided by discovery, which sorts groups lexically by name.
#[derive(Debug)]
pub struct TestGroup {
    /// Discovery key and report prefix.
    pub name: &'static str,
    /// Path (relative to the base URL) the navigator resets to before each
    /// case.
    pub page: &'static str,
    /// Fixed window size for groups asserting on layout; `None` uses the
    /// browser default.
    pub viewport: Option<Viewport>,
    pub cases: Vec<TestCase>,
}

impl TestGroup {
    pub fn new(name: &'static str, page: &'static str, cases: Vec<TestCase>) -> Self {
        Self {
            name,
            page,
            viewport: None,
            cases,
        }
    }

    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Some(Viewport { width, height });
        self
    }

    /// Sum of the group's case weights.
    pub fn max_score(&self) -> f64 {
        self.cases.iter().map(|case| case.weight).sum()
    }
}
