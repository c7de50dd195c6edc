//! Stock-lookup page: form structure, validation, and endpoint population

use std::time::Duration;

use futures::FutureExt;
use serde_json::json;
use webgrade_harness::check::{ensure, ensure_eq};
use webgrade_harness::{BrowserSession, CaseResult, TestCase, TestGroup};

const SYMBOLS: [(&str, &str); 3] = [
    ("symbol1", "AAPL"),
    ("symbol2", "GOOGL"),
    ("symbol3", "MSFT"),
];

const REQUIRED_FIELDS: [&str; 4] = ["company name", "industry", "sector", "stock price"];

pub fn group() -> TestGroup {
    TestGroup::new(
        "stock",
        "/stock",
        vec![
            TestCase::new(
                "form_structure",
                "Form has the required labels, symbol inputs and submit control",
                3.0,
                |s| form_structure(s).boxed(),
            ),
            TestCase::new(
                "empty_form_validation",
                "Empty form cannot be submitted",
                4.0,
                |s| empty_form_validation(s).boxed(),
            ),
            TestCase::new(
                "initial_stock_endpoints",
                "Stock endpoints return empty JSON before any submission",
                4.0,
                |s| initial_stock_endpoints(s).boxed(),
            ),
            TestCase::new(
                "form_submission_redirect",
                "Submitting the form redirects to /stock/page",
                5.0,
                |s| form_submission_redirect(s).boxed(),
            ),
            TestCase::new(
                "populated_stock_endpoints",
                "Stock endpoints return complete data after submission",
                5.0,
                |s| populated_stock_endpoints(s).boxed(),
            ),
        ],
    )
}

async fn form_structure(session: &BrowserSession) -> CaseResult<()> {
    let page = session.page();

    ensure(
        page.is_visible("form").await?,
        "Form should be visible on the page",
    )?;
    ensure_eq(
        page.count("label").await?,
        3,
        "Form should have exactly 3 labels",
    )?;
    ensure(
        page.is_visible("input[type='submit']").await?,
        "Submit button should be visible on the page",
    )?;

    for i in 1..=3 {
        let selector = format!("input[name='symbol{i}']");
        ensure_eq(
            page.count(&selector).await?,
            1,
            format!("Should have exactly one input with name 'symbol{i}'"),
        )?;
    }
    Ok(())
}

async fn empty_form_validation(session: &BrowserSession) -> CaseResult<()> {
    let page = session.page();

    page.click("input[type='submit']").await?;
    page.settle(Duration::from_millis(250)).await;

    ensure_eq(
        page.current_url().await?,
        session.absolute("/stock"),
        "Empty form should not be submitted",
    )
}

async fn initial_stock_endpoints(session: &BrowserSession) -> CaseResult<()> {
    for i in 1..=3 {
        let (status, body) = session.fetch_json(&format!("/stock/{i}")).await?;
        ensure_eq(
            status,
            200,
            format!("Stock endpoint {i} should return HTTP 200"),
        )?;
        ensure_eq(
            body,
            json!({}),
            format!("Stock endpoint {i} should return empty JSON initially"),
        )?;
    }
    Ok(())
}

async fn form_submission_redirect(session: &BrowserSession) -> CaseResult<()> {
    submit_symbols(session).await?;

    let target = session.absolute("/stock/page");
    let redirected = session
        .page()
        .wait_for_url(&target, session.page().wait_timeout())
        .await?;
    ensure(redirected, "Should redirect to /stock/page after submission")
}

async fn populated_stock_endpoints(session: &BrowserSession) -> CaseResult<()> {
    // Self-contained: performs its own submission rather than relying on
    // the redirect case having populated the backend.
    submit_symbols(session).await?;
    let target = session.absolute("/stock/page");
    session
        .page()
        .wait_for_url(&target, session.page().wait_timeout())
        .await?;

    for i in 1..=3 {
        let (status, body) = session.fetch_json(&format!("/stock/{i}")).await?;
        ensure_eq(
            status,
            200,
            format!("Stock endpoint {i} should return HTTP 200"),
        )?;
        for field in REQUIRED_FIELDS {
            let value = body.get(field);
            ensure(
                value.is_some(),
                format!("Response from /stock/{i} should contain \"{field}\""),
            )?;
            ensure(
                value.is_some_and(|v| !v.is_null()),
                format!("\"{field}\" in /stock/{i} should not be null"),
            )?;
        }
    }
    Ok(())
}

async fn submit_symbols(session: &BrowserSession) -> CaseResult<()> {
    let page = session.page();
    for (name, symbol) in SYMBOLS {
        page.fill(&format!("input[name='{name}']"), symbol).await?;
    }
    page.click("input[type='submit']").await
}
