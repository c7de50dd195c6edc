//! Sequential group execution and result aggregation
//!
//! Groups run one after another; within a group, cases run in declaration
//! order against a page the navigator resets before every case. A browser
//! that cannot be launched marks the whole group as errored and the run
//! continues, so the report still carries one entry per declared case.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::case::{Outcome, Status};
use crate::config::GraderConfig;
use crate::group::TestGroup;
use crate::navigator::Navigator;
use crate::report::{CaseRecord, Report};
use crate::session::BrowserSession;

/// Drives discovered groups to a finished report.
pub struct Runner {
    config: GraderConfig,
}

impl Runner {
    pub fn new(config: GraderConfig) -> Self {
        Self { config }
    }

    /// Deterministic ordering over the registered groups: lexical by group
    /// name. Case order inside each group is its declaration order.
    pub fn discover(mut groups: Vec<TestGroup>) -> Vec<TestGroup> {
        groups.sort_by(|a, b| a.name.cmp(b.name));
        groups
    }

    /// Execute every group sequentially and aggregate the outcomes.
    pub async fn run(&self, groups: Vec<TestGroup>) -> Report {
        let navigator = Navigator::new(self.config.nav_timeout);
        let mut records = Vec::new();

        for group in &groups {
            info!("running group {} ({} cases)", group.name, group.cases.len());
            self.run_group(group, &navigator, &mut records).await;
        }

        let report = Report::build(records);
        info!(
            "run complete: {:.1} / {:.1} across {} cases",
            report.total_score,
            report.max_score,
            report.per_case.len()
        );
        report
    }

    async fn run_group(
        &self,
        group: &TestGroup,
        navigator: &Navigator,
        records: &mut Vec<CaseRecord>,
    ) {
        let session_config = self.config.session_config(group);
        let session = match BrowserSession::open(&session_config).await {
            Ok(session) => session,
            Err(e) => {
                // Group-fatal: every declared case still gets a report entry.
                let message = format!("browser session for group {} failed: {e}", group.name);
                error!("{message}");
                for case in &group.cases {
                    records.push(CaseRecord::new(
                        group.name,
                        case,
                        Outcome::error(message.clone(), Duration::ZERO),
                    ));
                }
                return;
            }
        };

        for case in &group.cases {
            let outcome = match navigator.reset(&session, group.page).await {
                Ok(()) => case.execute(&session).await,
                Err(e) => Outcome::error(e.to_string(), Duration::ZERO),
            };

            match outcome.status {
                Status::Pass => info!("✓ {}::{} ({} ms)", group.name, case.id, outcome.elapsed.as_millis()),
                Status::Fail => warn!("✗ {}::{} - {}", group.name, case.id, outcome.output()),
                Status::Error => error!("✗ {}::{} - {}", group.name, case.id, outcome.output()),
            }

            records.push(CaseRecord::new(group.name, case, outcome));
        }

        // Exactly one close per opened session, whatever the cases did.
        if let Err(e) = session.close().await {
            warn!("session close for group {} failed: {e}", group.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_groups(names: &[&'static str]) -> Vec<TestGroup> {
        names
            .iter()
            .map(|&name| TestGroup::new(name, "/", vec![]))
            .collect()
    }

    #[test]
    fn test_discover_orders_lexically() {
        let groups = Runner::discover(named_groups(&["stock", "clock_css", "puppy_html"]));
        let names: Vec<&str> = groups.iter().map(|g| g.name).collect();
        assert_eq!(names, ["clock_css", "puppy_html", "stock"]);
    }

    #[test]
    fn test_discover_is_deterministic() {
        let first = Runner::discover(named_groups(&["b", "a", "c"]));
        let second = Runner::discover(named_groups(&["b", "a", "c"]));
        let first_names: Vec<&str> = first.iter().map(|g| g.name).collect();
        let second_names: Vec<&str> = second.iter().map(|g| g.name).collect();
        assert_eq!(first_names, second_names);
    }
}
