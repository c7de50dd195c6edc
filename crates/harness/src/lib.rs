//! Webgrade Test Harness
//!
//! This crate provides the grading harness that drives a headless browser
//! against the web application under test and aggregates weighted case
//! results into a grading-platform report:
//! - Opens one browser session (CDP) per test group
//! - Resets the page to the group's URL before every case
//! - Converts assertion failures and unexpected errors into per-case outcomes
//! - Serializes an ordered, scored report in the platform's JSON shape
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Grading Runner                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Runner                                                     │
//! │    ├── discover() -> ordered Vec<TestGroup>                 │
//! │    ├── run(groups) -> Report                                │
//! │    └── Report::write_to(path)                               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestGroup                                                  │
//! │    ├── BrowserSession (one browser, one page, one client)   │
//! │    ├── Navigator::reset before every case                   │
//! │    └── cases: [TestCase]                                    │
//! │          ├── id, name, weight, visibility                   │
//! │          └── run: fn(&BrowserSession) -> Outcome            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The application under test is an external collaborator: it must already
//! be running at the configured base URL, and the harness observes it only
//! through the browser and plain HTTP requests.

pub mod case;
pub mod check;
pub mod config;
pub mod error;
pub mod group;
pub mod navigator;
pub mod page;
pub mod report;
pub mod runner;
pub mod session;

pub use case::{CaseBody, Outcome, Status, TestCase, Visibility};
pub use config::GraderConfig;
pub use error::{CaseError, CaseResult, HarnessError, HarnessResult};
pub use group::TestGroup;
pub use navigator::Navigator;
pub use page::PageHandle;
pub use report::{CaseRecord, Report};
pub use runner::Runner;
pub use session::{BrowserSession, SessionConfig, Viewport};
