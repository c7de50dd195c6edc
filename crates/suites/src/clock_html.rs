//! World-clock page: document structure and required resources

use futures::FutureExt;
use serde::Deserialize;
use webgrade_harness::check::{ensure, ensure_eq};
use webgrade_harness::{BrowserSession, CaseResult, TestCase, TestGroup};

pub fn group() -> TestGroup {
    TestGroup::new(
        "clock_html",
        "/world-clock",
        vec![
            TestCase::new(
                "form_elements",
                "Page has two forms with the correct input elements",
                3.0,
                |s| form_elements(s).boxed(),
            ),
            TestCase::new(
                "heading_element",
                "Page has a single h2 heading reading 'My Clocks'",
                2.0,
                |s| heading_element(s).boxed(),
            ),
            TestCase::new(
                "clocks_list",
                "Page has a ul element with id 'clocks'",
                2.0,
                |s| clocks_list(s).boxed(),
            ),
            TestCase::new(
                "template_structure",
                "Template contains an li with timezone, offset and time divs",
                4.0,
                |s| template_structure(s).boxed(),
            ),
            TestCase::new(
                "required_resources",
                "Required CSS and JavaScript files are included correctly",
                3.0,
                |s| required_resources(s).boxed(),
            ),
        ],
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormInventory {
    form_count: u64,
    first_text: u64,
    first_submit: u64,
    second_number: u64,
    second_submit: u64,
}

async fn form_elements(session: &BrowserSession) -> CaseResult<()> {
    let inventory: FormInventory = session
        .page()
        .evaluate(
            r#"(() => {
                const forms = document.querySelectorAll('form');
                const count = (form, sel) => form ? form.querySelectorAll(sel).length : 0;
                return {
                    formCount: forms.length,
                    firstText: count(forms[0], "input[type='text']"),
                    firstSubmit: count(forms[0], "input[type='submit']"),
                    secondNumber: count(forms[1], "input[type='number']"),
                    secondSubmit: count(forms[1], "input[type='submit']"),
                };
            })()"#,
        )
        .await?;

    ensure_eq(inventory.form_count, 2, "Page should have exactly 2 forms")?;
    ensure_eq(
        inventory.first_text,
        1,
        "First form should have one text input",
    )?;
    ensure_eq(
        inventory.first_submit,
        1,
        "First form should have one submit input",
    )?;
    ensure_eq(
        inventory.second_number,
        1,
        "Second form should have one number input",
    )?;
    ensure_eq(
        inventory.second_submit,
        1,
        "Second form should have one submit input",
    )
}

async fn heading_element(session: &BrowserSession) -> CaseResult<()> {
    let page = session.page();
    ensure_eq(
        page.count("h2").await?,
        1,
        "Page should have exactly one h2 element",
    )?;
    ensure_eq(
        page.inner_text("h2").await?.as_str(),
        "My Clocks",
        "h2 element should have text content 'My Clocks'",
    )
}

async fn clocks_list(session: &BrowserSession) -> CaseResult<()> {
    ensure_eq(
        session.page().count("ul#clocks").await?,
        1,
        "Page should have exactly one ul element with id 'clocks'",
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateShape {
    has_li: bool,
    has_timezone: bool,
    has_offset: bool,
    has_time: bool,
}

async fn template_structure(session: &BrowserSession) -> CaseResult<()> {
    let page = session.page();
    ensure_eq(
        page.count("template").await?,
        1,
        "Page should have exactly one template element",
    )?;

    let shape: TemplateShape = page
        .evaluate(
            r#"(() => {
                const content = document.querySelector('template').content;
                return {
                    hasLi: content.querySelector('li') !== null,
                    hasTimezone: content.querySelector('li div.timezone') !== null,
                    hasOffset: content.querySelector('li div.offset') !== null,
                    hasTime: content.querySelector('li div.time') !== null,
                };
            })()"#,
        )
        .await?;

    ensure(shape.has_li, "Template should contain one li element")?;
    ensure(
        shape.has_timezone,
        "Template should have one div with class 'timezone'",
    )?;
    ensure(
        shape.has_offset,
        "Template should have one div with class 'offset'",
    )?;
    ensure(
        shape.has_time,
        "Template should have one div with class 'time'",
    )
}

async fn required_resources(session: &BrowserSession) -> CaseResult<()> {
    let page = session.page();

    let css_in_head: bool = page
        .evaluate(
            r#"(() => {
                const link = document.querySelector('link[href="/public/css/world_clock.css"]');
                return !!link && link.parentNode.tagName.toLowerCase() === 'head';
            })()"#,
        )
        .await?;
    ensure(css_in_head, "CSS link should be in the head element")?;

    let js_is_last: bool = page
        .evaluate(
            r#"(() => {
                const last = document.body.lastElementChild;
                return !!last
                    && last.tagName.toLowerCase() === 'script'
                    && last.src.endsWith('/public/js/world_clock.js');
            })()"#,
        )
        .await?;
    ensure(
        js_is_last,
        "JavaScript script should be the last element in body",
    )
}
