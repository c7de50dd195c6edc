//! Shape and determinism checks over the registered suites
//!
//! These run without a browser: they exercise the registration list, the
//! discovery ordering, and the per-group case inventories the report
//! depends on.

use std::collections::HashSet;

use test_case::test_case;
use webgrade_harness::{Runner, Visibility};

#[test]
fn all_groups_are_registered() {
    let groups = webgrade_suites::groups();
    assert_eq!(groups.len(), 6);
}

#[test]
fn discovery_orders_groups_lexically() {
    let groups = Runner::discover(webgrade_suites::groups());
    let names: Vec<&str> = groups.iter().map(|g| g.name).collect();
    assert_eq!(
        names,
        [
            "clock_css",
            "clock_html",
            "clock_js",
            "puppy_css",
            "puppy_html",
            "stock"
        ]
    );
}

#[test]
fn discovery_is_deterministic() {
    let first = Runner::discover(webgrade_suites::groups());
    let second = Runner::discover(webgrade_suites::groups());

    let snapshot = |groups: &[webgrade_harness::TestGroup]| -> Vec<(String, Vec<String>)> {
        groups
            .iter()
            .map(|g| {
                (
                    g.name.to_string(),
                    g.cases.iter().map(|c| c.id.to_string()).collect(),
                )
            })
            .collect()
    };
    assert_eq!(snapshot(&first), snapshot(&second));
}

#[test_case("clock_css", 3, 15.0; "clock css")]
#[test_case("clock_html", 5, 14.0; "clock html")]
#[test_case("clock_js", 5, 25.0; "clock js")]
#[test_case("puppy_css", 4, 12.0; "puppy css")]
#[test_case("puppy_html", 4, 20.0; "puppy html")]
#[test_case("stock", 5, 21.0; "stock")]
fn group_case_counts_and_max_scores(name: &str, cases: usize, max_score: f64) {
    let groups = webgrade_suites::groups();
    let group = groups.iter().find(|g| g.name == name).unwrap();
    assert_eq!(group.cases.len(), cases);
    assert_eq!(group.max_score(), max_score);
}

#[test]
fn case_ids_are_unique_within_each_group() {
    for group in webgrade_suites::groups() {
        let ids: HashSet<&str> = group.cases.iter().map(|c| c.id).collect();
        assert_eq!(
            ids.len(),
            group.cases.len(),
            "duplicate case id in group {}",
            group.name
        );
    }
}

#[test]
fn weights_are_positive() {
    for group in webgrade_suites::groups() {
        for case in &group.cases {
            assert!(
                case.weight > 0.0,
                "non-positive weight on {}::{}",
                group.name,
                case.id
            );
        }
    }
}

#[test]
fn style_groups_pin_the_viewport() {
    for group in webgrade_suites::groups() {
        match group.name {
            "clock_css" | "puppy_css" => {
                let viewport = group.viewport.expect("style group needs a viewport");
                assert_eq!((viewport.width, viewport.height), (1024, 768));
            }
            _ => assert!(group.viewport.is_none(), "{} should not pin a viewport", group.name),
        }
    }
}

#[test]
fn every_case_is_learner_visible() {
    for group in webgrade_suites::groups() {
        for case in &group.cases {
            assert_eq!(case.visibility, Visibility::Visible);
        }
    }
}

#[test]
fn group_pages_match_the_application_routes() {
    for group in webgrade_suites::groups() {
        let expected = match group.name {
            "stock" => "/stock",
            "clock_css" | "clock_html" | "clock_js" => "/world-clock",
            "puppy_css" | "puppy_html" => "/puppy-pong",
            other => panic!("unexpected group {other}"),
        };
        assert_eq!(group.page, expected);
    }
}
