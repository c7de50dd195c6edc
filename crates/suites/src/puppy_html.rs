//! Puppy-pong page: document structure and required resources

use futures::FutureExt;
use serde::Deserialize;
use webgrade_harness::check::{ensure, ensure_eq, ensure_in_range, ensure_matches};
use webgrade_harness::{BrowserSession, CaseResult, TestCase, TestGroup};

pub fn group() -> TestGroup {
    TestGroup::new(
        "puppy_html",
        "/puppy-pong",
        vec![
            TestCase::new(
                "score_and_time_paragraphs",
                "Page has score and time paragraphs in the correct format",
                5.0,
                |s| score_and_time_paragraphs(s).boxed(),
            ),
            TestCase::new(
                "puppy_image",
                "Puppy image exists with the correct source and size",
                5.0,
                |s| puppy_image(s).boxed(),
            ),
            TestCase::new(
                "deathzone_and_player",
                "Death zone div contains the player span",
                5.0,
                |s| deathzone_and_player(s).boxed(),
            ),
            TestCase::new(
                "required_resources",
                "Required CSS and script are included",
                5.0,
                |s| required_resources(s).boxed(),
            ),
        ],
    )
}

async fn score_and_time_paragraphs(session: &BrowserSession) -> CaseResult<()> {
    let page = session.page();

    ensure_eq(
        page.count("p").await?,
        2,
        "Page should have exactly 2 paragraphs",
    )?;

    let score = page.inner_text_nth("p", 0).await?;
    ensure_matches(
        r"^Score: \d+$",
        score.trim(),
        "First paragraph should follow format 'Score: N'",
    )?;

    let time = page.inner_text_nth("p", 1).await?;
    ensure_matches(
        r"^Time: \d+ secs$",
        time.trim(),
        "Second paragraph should follow format 'Time: N secs'",
    )
}

#[derive(Debug, Deserialize)]
struct ImageSize {
    height: i64,
    width: i64,
}

async fn puppy_image(session: &BrowserSession) -> CaseResult<()> {
    let page = session.page();

    ensure_eq(
        page.count("img[src='/public/puppy.jpg']").await?,
        1,
        "Page should have exactly one puppy image",
    )?;

    let size: ImageSize = page
        .evaluate(
            r#"(() => {
                const img = document.querySelector('img');
                return { height: img.offsetHeight, width: img.offsetWidth };
            })()"#,
        )
        .await?;

    ensure_in_range(size.height, 100, 300, "Image height should be 200px")?;
    ensure_in_range(size.width, 200, 400, "Image width should be 300px")
}

async fn deathzone_and_player(session: &BrowserSession) -> CaseResult<()> {
    let page = session.page();

    ensure_eq(
        page.count("div#deathzone").await?,
        1,
        "Page should have exactly one div with id 'deathzone'",
    )?;
    ensure_eq(
        page.count("span#player").await?,
        1,
        "Page should have exactly one span with id 'player'",
    )?;

    let player_in_deathzone: bool = page
        .evaluate(
            r#"(() => {
                const player = document.querySelector('#player');
                const deathzone = document.querySelector('#deathzone');
                return !!player && !!deathzone && deathzone.contains(player);
            })()"#,
        )
        .await?;
    ensure(
        player_in_deathzone,
        "Player span should be inside deathzone div",
    )
}

async fn required_resources(session: &BrowserSession) -> CaseResult<()> {
    let page = session.page();

    let css_in_head: bool = page
        .evaluate(
            r#"(() => {
                const link = document.querySelector('link[href="/public/css/puppy_pong.css"]');
                return !!link && link.parentNode.tagName.toLowerCase() === 'head';
            })()"#,
        )
        .await?;
    ensure(css_in_head, "CSS link should be in the head element")?;

    ensure_eq(
        page.count("script[src='/public/js/puppy_pong.js']").await?,
        1,
        "Page should include puppy_pong.js script",
    )
}
