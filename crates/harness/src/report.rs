//! Aggregate report and the grading platform's wire format
//!
//! The internal `Report` keeps full case metadata and outcomes; `write_to`
//! serializes the fixed platform shape
//! `{score, max_score, tests: [{name, score, max_score, visibility,
//! output}]}` and renames a temporary file into place so a failed write
//! never leaves a garbled document behind.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::case::{Outcome, Status, TestCase, Visibility};
use crate::error::HarnessResult;

/// One case's metadata plus its outcome, in execution order.
#[derive(Debug, Clone, Serialize)]
pub struct CaseRecord {
    pub group: &'static str,
    pub id: &'static str,
    pub name: &'static str,
    pub weight: f64,
    pub visibility: Visibility,
    pub outcome: Outcome,
}

impl CaseRecord {
    pub fn new(group: &'static str, case: &TestCase, outcome: Outcome) -> Self {
        Self {
            group,
            id: case.id,
            name: case.name,
            weight: case.weight,
            visibility: case.visibility,
            outcome,
        }
    }

    /// Score contribution: full weight on pass, zero otherwise.
    pub fn score(&self) -> f64 {
        if self.outcome.status == Status::Pass {
            self.weight
        } else {
            0.0
        }
    }
}

/// The aggregate of all case outcomes for one run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub total_score: f64,
    pub max_score: f64,
    pub per_case: Vec<CaseRecord>,
}

impl Report {
    /// Build the aggregate from execution-ordered records.
    pub fn build(per_case: Vec<CaseRecord>) -> Self {
        let total_score = per_case.iter().map(CaseRecord::score).sum();
        let max_score = per_case.iter().map(|record| record.weight).sum();
        Self {
            total_score,
            max_score,
            per_case,
        }
    }

    /// Serialize the platform wire format.
    pub fn to_json(&self) -> HarnessResult<Vec<u8>> {
        let wire = WireReport {
            score: self.total_score,
            max_score: self.max_score,
            tests: self
                .per_case
                .iter()
                .map(|record| WireTest {
                    name: record.name.to_string(),
                    score: record.score(),
                    max_score: record.weight,
                    visibility: record.visibility.as_str(),
                    output: record.outcome.output(),
                })
                .collect(),
        };
        Ok(serde_json::to_vec_pretty(&wire)?)
    }

    /// Write the report atomically: serialize fully, write a temporary file
    /// next to the target, then rename into place.
    pub fn write_to(&self, path: &Path) -> HarnessResult<()> {
        let bytes = self.to_json()?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                std::fs::create_dir_all(parent)?;
                parent
            }
            _ => Path::new("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.persist(path).map_err(|e| e.error)?;

        info!("report written to {}", path.display());
        Ok(())
    }
}

#[derive(Serialize)]
struct WireReport {
    score: f64,
    max_score: f64,
    tests: Vec<WireTest>,
}

#[derive(Serialize)]
struct WireTest {
    name: String,
    score: f64,
    max_score: f64,
    visibility: &'static str,
    output: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn record(id: &'static str, weight: f64, outcome: Outcome) -> CaseRecord {
        CaseRecord {
            group: "stock",
            id,
            name: id,
            weight,
            visibility: Visibility::Visible,
            outcome,
        }
    }

    #[test]
    fn test_totals_count_passing_weights_once() {
        let report = Report::build(vec![
            record("a", 3.0, Outcome::pass(Duration::ZERO)),
            record("b", 4.0, Outcome::fail("nope", Duration::ZERO)),
            record("c", 5.0, Outcome::error("boom", Duration::ZERO)),
            record("d", 2.0, Outcome::pass(Duration::ZERO)),
        ]);
        assert_eq!(report.total_score, 5.0);
        assert_eq!(report.max_score, 14.0);
        assert!(report.total_score <= report.max_score);
    }

    #[test]
    fn test_empty_report() {
        let report = Report::build(vec![]);
        assert_eq!(report.total_score, 0.0);
        assert_eq!(report.max_score, 0.0);
        assert!(report.per_case.is_empty());
    }

    #[test]
    fn test_wire_format_field_names() {
        let report = Report::build(vec![
            record("a", 3.0, Outcome::pass(Duration::ZERO)),
            record("b", 4.0, Outcome::fail("Form should have exactly 3 labels", Duration::ZERO)),
        ]);
        let json: serde_json::Value =
            serde_json::from_slice(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["score"], 3.0);
        assert_eq!(json["max_score"], 7.0);

        let tests = json["tests"].as_array().unwrap();
        assert_eq!(tests.len(), 2);
        assert_eq!(tests[0]["name"], "a");
        assert_eq!(tests[0]["score"], 3.0);
        assert_eq!(tests[0]["max_score"], 3.0);
        assert_eq!(tests[0]["visibility"], "visible");
        assert_eq!(tests[0]["output"], "passed");
        assert_eq!(tests[1]["score"], 0.0);
        assert_eq!(tests[1]["output"], "Form should have exactly 3 labels");

        // Exactly the platform's fields, no extras.
        let keys: Vec<&String> = tests[0].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["max_score", "name", "output", "score", "visibility"]);
    }

    #[test]
    fn test_write_to_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results").join("results.json");

        let report = Report::build(vec![record("a", 3.0, Outcome::pass(Duration::ZERO))]);
        report.write_to(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(json["score"], 3.0);
    }

    #[test]
    fn test_write_to_unwritable_path_errors_without_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("results.json");
        // A directory where the file should go makes the rename fail.
        std::fs::create_dir(&blocker).unwrap();

        let report = Report::build(vec![record("a", 3.0, Outcome::pass(Duration::ZERO))]);
        assert!(report.write_to(&blocker).is_err());
        // The target is still the directory we created, not a partial file.
        assert!(blocker.is_dir());
    }
}
