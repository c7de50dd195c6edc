//! Puppy-pong page: styling checks
//!
//! Sizing assertions compare against the window, so this group pins the
//! viewport.

use futures::FutureExt;
use serde::Deserialize;
use webgrade_harness::check::ensure_eq;
use webgrade_harness::{BrowserSession, CaseResult, TestCase, TestGroup};

const DARK: &str = "rgb(34, 34, 34)";
const BLACK: &str = "rgb(0, 0, 0)";
const WHITE: &str = "rgb(255, 255, 255)";

pub fn group() -> TestGroup {
    TestGroup::new(
        "puppy_css",
        "/puppy-pong",
        vec![
            TestCase::new(
                "body_styles",
                "Body has the correct background color and height",
                3.0,
                |s| body_styles(s).boxed(),
            ),
            TestCase::new(
                "absolute_positioning",
                "Puppy image and death zone are absolutely positioned",
                3.0,
                |s| absolute_positioning(s).boxed(),
            ),
            TestCase::new(
                "deathzone_styles",
                "Death zone is black, full-width, and at the bottom",
                3.0,
                |s| deathzone_styles(s).boxed(),
            ),
            TestCase::new(
                "text_and_player_colors",
                "Paragraphs have white text and the player a white background",
                3.0,
                |s| text_and_player_colors(s).boxed(),
            ),
        ],
    )
    .with_viewport(1024, 768)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BodyStyles {
    background_color: String,
    height: i64,
    window_height: i64,
}

async fn body_styles(session: &BrowserSession) -> CaseResult<()> {
    let body: BodyStyles = session
        .page()
        .evaluate(
            r#"(() => {
                const styles = window.getComputedStyle(document.body);
                return {
                    backgroundColor: styles.backgroundColor,
                    height: document.body.clientHeight,
                    windowHeight: window.innerHeight,
                };
            })()"#,
        )
        .await?;

    ensure_eq(
        body.background_color.as_str(),
        DARK,
        "Body background color should be #222",
    )?;
    ensure_eq(
        body.height,
        body.window_height,
        "Body height should match window height",
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Positioning {
    img_position: String,
    deathzone_position: String,
}

async fn absolute_positioning(session: &BrowserSession) -> CaseResult<()> {
    let positioning: Positioning = session
        .page()
        .evaluate(
            r#"(() => {
                const img = document.querySelector('img');
                const deathzone = document.querySelector('#deathzone');
                return {
                    imgPosition: window.getComputedStyle(img).position,
                    deathzonePosition: window.getComputedStyle(deathzone).position,
                };
            })()"#,
        )
        .await?;

    ensure_eq(
        positioning.img_position.as_str(),
        "absolute",
        "Puppy image should be absolutely positioned",
    )?;
    ensure_eq(
        positioning.deathzone_position.as_str(),
        "absolute",
        "Death zone should be absolutely positioned",
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeathzoneStyles {
    background_color: String,
    width: i64,
    window_width: i64,
    bottom: String,
}

async fn deathzone_styles(session: &BrowserSession) -> CaseResult<()> {
    let deathzone: DeathzoneStyles = session
        .page()
        .evaluate(
            r#"(() => {
                const deathzone = document.querySelector('#deathzone');
                const styles = window.getComputedStyle(deathzone);
                return {
                    backgroundColor: styles.backgroundColor,
                    width: deathzone.clientWidth,
                    windowWidth: window.innerWidth,
                    bottom: styles.bottom,
                };
            })()"#,
        )
        .await?;

    ensure_eq(
        deathzone.background_color.as_str(),
        BLACK,
        "Death zone background color should be black",
    )?;
    ensure_eq(
        deathzone.width,
        deathzone.window_width,
        "Death zone width should match window width",
    )?;
    ensure_eq(
        deathzone.bottom.as_str(),
        "0px",
        "Death zone should be at the bottom of the browser",
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageColors {
    paragraph_colors: Vec<String>,
    player_background_color: String,
}

async fn text_and_player_colors(session: &BrowserSession) -> CaseResult<()> {
    let colors: PageColors = session
        .page()
        .evaluate(
            r#"(() => {
                const paragraphs = document.querySelectorAll('p');
                const player = document.querySelector('#player');
                return {
                    paragraphColors: Array.from(paragraphs)
                        .map(p => window.getComputedStyle(p).color),
                    playerBackgroundColor: window.getComputedStyle(player).backgroundColor,
                };
            })()"#,
        )
        .await?;

    for (i, color) in colors.paragraph_colors.iter().enumerate() {
        ensure_eq(
            color.as_str(),
            WHITE,
            format!("Paragraph {} should have white text color", i + 1),
        )?;
    }
    ensure_eq(
        colors.player_background_color.as_str(),
        WHITE,
        "Player should have white background color",
    )
}
