//! World-clock page: client-side clock list behavior
//!
//! The timezone form is the first on the page, the index-removal form the
//! second; their submit controls are addressed by document order.

use std::time::Duration;

use futures::FutureExt;
use webgrade_harness::check::{ensure, ensure_eq};
use webgrade_harness::{BrowserSession, CaseResult, TestCase, TestGroup};

const TIMEZONE_INPUT: &str = "form input[type='text']";
const INDEX_INPUT: &str = "form input[type='number']";
const SUBMITS: &str = "form input[type='submit']";
const CLOCK_ITEMS: &str = "ul#clocks li";

pub fn group() -> TestGroup {
    TestGroup::new(
        "clock_js",
        "/world-clock",
        vec![
            TestCase::new(
                "empty_form_submission",
                "Empty forms cannot be submitted",
                5.0,
                |s| empty_form_submission(s).boxed(),
            ),
            TestCase::new(
                "invalid_timezone_submission",
                "Invalid timezone input does not add a clock",
                5.0,
                |s| invalid_timezone_submission(s).boxed(),
            ),
            TestCase::new(
                "valid_timezone_submission",
                "Valid timezone input adds a structured clock",
                5.0,
                |s| valid_timezone_submission(s).boxed(),
            ),
            TestCase::new(
                "valid_index_removal",
                "Valid index removes the matching clock",
                5.0,
                |s| valid_index_removal(s).boxed(),
            ),
            TestCase::new(
                "invalid_index_removal",
                "Out-of-range index removes nothing",
                5.0,
                |s| invalid_index_removal(s).boxed(),
            ),
        ],
    )
}

async fn empty_form_submission(session: &BrowserSession) -> CaseResult<()> {
    let page = session.page();

    page.click_nth(SUBMITS, 0).await?;
    page.settle(Duration::from_millis(250)).await;
    ensure_eq(
        page.count(CLOCK_ITEMS).await?,
        0,
        "No clock should be added with empty input",
    )?;

    page.click_nth(SUBMITS, 1).await?;
    page.settle(Duration::from_millis(250)).await;
    ensure_eq(
        page.current_url().await?,
        session.absolute("/world-clock"),
        "Page should remain on same URL after empty form submission",
    )
}

async fn invalid_timezone_submission(session: &BrowserSession) -> CaseResult<()> {
    let page = session.page();

    page.fill(TIMEZONE_INPUT, "INVALID").await?;
    page.click_nth(SUBMITS, 0).await?;
    page.settle(Duration::from_millis(500)).await;

    ensure_eq(
        page.count(CLOCK_ITEMS).await?,
        0,
        "No clock should be added with invalid timezone",
    )
}

async fn valid_timezone_submission(session: &BrowserSession) -> CaseResult<()> {
    let page = session.page();
    add_clock(session).await?;

    ensure_eq(
        page.count(CLOCK_ITEMS).await?,
        1,
        "One clock should be added",
    )?;
    ensure(
        page.is_visible("ul#clocks li div.timezone").await?,
        "Clock should have timezone div",
    )?;
    ensure(
        page.is_visible("ul#clocks li div.offset").await?,
        "Clock should have offset div",
    )?;
    ensure(
        page.is_visible("ul#clocks li div.time").await?,
        "Clock should have time div",
    )?;
    ensure_eq(
        page.input_value(TIMEZONE_INPUT).await?.as_str(),
        "",
        "Input should be cleared after submission",
    )
}

async fn valid_index_removal(session: &BrowserSession) -> CaseResult<()> {
    let page = session.page();
    add_clock(session).await?;

    page.fill(INDEX_INPUT, "1").await?;
    page.click_nth(SUBMITS, 1).await?;
    page.settle(Duration::from_millis(500)).await;

    ensure_eq(page.count(CLOCK_ITEMS).await?, 0, "Clock should be removed")?;
    ensure_eq(
        page.input_value(INDEX_INPUT).await?.as_str(),
        "",
        "Input should be cleared after submission",
    )
}

async fn invalid_index_removal(session: &BrowserSession) -> CaseResult<()> {
    let page = session.page();
    add_clock(session).await?;

    page.fill(INDEX_INPUT, "9").await?;
    page.click_nth(SUBMITS, 1).await?;
    page.settle(Duration::from_millis(500)).await;

    ensure_eq(
        page.count(CLOCK_ITEMS).await?,
        1,
        "Clock should not be removed with invalid index",
    )
}

/// Submit "PST" through the timezone form; the bounded wait is the graded
/// condition, so non-appearance fails rather than errors.
async fn add_clock(session: &BrowserSession) -> CaseResult<()> {
    let page = session.page();
    page.fill(TIMEZONE_INPUT, "PST").await?;
    page.click_nth(SUBMITS, 0).await?;

    let added = page
        .try_wait_for_selector(CLOCK_ITEMS, page.wait_timeout())
        .await?;
    ensure(added, "Clock element was not added within 5 seconds")
}
