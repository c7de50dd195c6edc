//! World-clock page: extra-credit styling checks
//!
//! Layout assertions need a fixed window size, so this group pins the
//! viewport. All cases are explicitly learner-visible.

use std::time::Duration;

use futures::FutureExt;
use serde::Deserialize;
use webgrade_harness::check::{ensure_contains, ensure_eq};
use webgrade_harness::{BrowserSession, CaseResult, TestCase, TestGroup, Visibility};

const PINK: &str = "rgb(255, 192, 203)";
const AQUA: &str = "rgb(0, 255, 255)";

pub fn group() -> TestGroup {
    TestGroup::new(
        "clock_css",
        "/world-clock",
        vec![
            TestCase::new(
                "input_background_color",
                "[Extra] Input elements have a pink background color",
                3.0,
                |s| input_background_color(s).boxed(),
            )
            .with_visibility(Visibility::Visible),
            TestCase::new(
                "input_hover_color",
                "[Extra] Input elements turn aqua on hover",
                3.0,
                |s| input_hover_color(s).boxed(),
            )
            .with_visibility(Visibility::Visible),
            TestCase::new(
                "clock_grid_layout",
                "[Extra] Clocks use a CSS grid with the correct tracks",
                9.0,
                |s| clock_grid_layout(s).boxed(),
            )
            .with_visibility(Visibility::Visible),
        ],
    )
    .with_viewport(1024, 768)
}

async fn input_background_color(session: &BrowserSession) -> CaseResult<()> {
    let colors: Vec<String> = session
        .page()
        .evaluate(
            r#"Array.from(document.querySelectorAll("input[type='submit']"))
                .map(input => window.getComputedStyle(input).backgroundColor)"#,
        )
        .await?;

    for color in colors {
        ensure_eq(
            color.to_lowercase().as_str(),
            PINK,
            "Input elements should have pink background color",
        )?;
    }
    Ok(())
}

async fn input_hover_color(session: &BrowserSession) -> CaseResult<()> {
    let page = session.page();
    let submits = page.count("input[type='submit']").await?;

    for i in 0..submits as usize {
        page.hover_nth("input[type='submit']", i).await?;
        // Give the hover style a moment to apply.
        page.settle(Duration::from_millis(100)).await;

        let color: String = page
            .evaluate(&format!(
                r#"window.getComputedStyle(document.querySelectorAll("input[type='submit']")[{i}]).backgroundColor"#
            ))
            .await?;
        ensure_eq(
            color.to_lowercase().as_str(),
            AQUA,
            format!(
                "Input element {} should have aqua background color on hover",
                i + 1
            ),
        )?;
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridProperties {
    display: String,
    grid_template_columns: String,
    grid_template_rows: String,
    grid_auto_flow: String,
}

async fn clock_grid_layout(session: &BrowserSession) -> CaseResult<()> {
    let grid: GridProperties = session
        .page()
        .evaluate(
            r#"(() => {
                const styles = window.getComputedStyle(document.querySelector('#clocks'));
                return {
                    display: styles.display,
                    gridTemplateColumns: styles.gridTemplateColumns,
                    gridTemplateRows: styles.gridTemplateRows,
                    gridAutoFlow: styles.gridAutoFlow,
                };
            })()"#,
        )
        .await?;

    ensure_eq(
        grid.display.as_str(),
        "grid",
        "Clocks container should use CSS grid display",
    )?;
    ensure_contains(
        &grid.grid_template_columns,
        "240px",
        "Grid should have 5 columns of 240px each",
    )?;
    ensure_contains(
        &grid.grid_template_rows,
        "120px",
        "Grid should have 2 rows of 120px each",
    )?;
    ensure_eq(
        grid.grid_auto_flow.as_str(),
        "row",
        "Grid auto-flow should be set to row",
    )
}
