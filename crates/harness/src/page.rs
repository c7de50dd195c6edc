//! Page queries and simulated user input
//!
//! DOM structure and computed styles are read through in-page script
//! evaluation with serde-typed results; interactions that must look like
//! real input (clicks, typing, hover) go through element handles and raw
//! CDP input events so that form submission and `:hover` styling behave as
//! they would for a user.

use std::time::{Duration, Instant};

use chromiumoxide::cdp::browser_protocol::input::{
    DispatchMouseEventParams, DispatchMouseEventType,
};
use chromiumoxide::page::Page;
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::trace;

use crate::error::{CaseError, CaseResult};

/// The one page a session owns, with bounded-wait query and input helpers.
pub struct PageHandle {
    page: Page,
    wait_timeout: Duration,
    poll_interval: Duration,
}

impl PageHandle {
    pub(crate) fn new(page: Page, wait_timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            page,
            wait_timeout,
            poll_interval,
        }
    }

    /// Default deadline for bounded waits.
    pub fn wait_timeout(&self) -> Duration {
        self.wait_timeout
    }

    pub(crate) async fn goto(&self, url: &str) -> CaseResult<()> {
        trace!("goto {url}");
        self.page
            .goto(url)
            .await
            .map_err(|e| CaseError::execution(format!("navigation to {url} failed: {e}")))?;
        Ok(())
    }

    /// Evaluate a script expression and decode its result.
    pub async fn evaluate<T: DeserializeOwned>(&self, expression: &str) -> CaseResult<T> {
        let result = self
            .page
            .evaluate(expression)
            .await
            .map_err(|e| CaseError::execution(format!("script evaluation failed: {e}")))?;
        result
            .into_value::<T>()
            .map_err(|e| CaseError::execution(format!("could not decode script result: {e}")))
    }

    /// Number of elements matching a selector.
    pub async fn count(&self, selector: &str) -> CaseResult<u64> {
        let expression = format!(
            "document.querySelectorAll({}).length",
            js_string(selector)
        );
        self.evaluate(&expression).await
    }

    /// Whether the first match for a selector is rendered and visible.
    pub async fn is_visible(&self, selector: &str) -> CaseResult<bool> {
        let expression = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                if (!el) return false;
                const rect = el.getBoundingClientRect();
                const style = window.getComputedStyle(el);
                return rect.width > 0 && rect.height > 0
                    && style.display !== 'none' && style.visibility !== 'hidden';
            }})()"#,
            sel = js_string(selector)
        );
        self.evaluate(&expression).await
    }

    /// Rendered text of the first match for a selector.
    pub async fn inner_text(&self, selector: &str) -> CaseResult<String> {
        self.inner_text_nth(selector, 0).await
    }

    /// Rendered text of the index-th match for a selector, in document order.
    pub async fn inner_text_nth(&self, selector: &str, index: usize) -> CaseResult<String> {
        let expression = format!(
            r#"(() => {{
                const el = document.querySelectorAll({sel})[{index}];
                return el ? el.innerText : null;
            }})()"#,
            sel = js_string(selector)
        );
        let text: Option<String> = self.evaluate(&expression).await?;
        text.ok_or_else(|| {
            CaseError::execution(format!(
                "no element at index {index} for selector {selector}"
            ))
        })
    }

    /// Current value of the first input matching a selector.
    pub async fn input_value(&self, selector: &str) -> CaseResult<String> {
        let expression = format!(
            r#"(() => {{
                const el = document.querySelector({sel});
                return el ? el.value : null;
            }})()"#,
            sel = js_string(selector)
        );
        let value: Option<String> = self.evaluate(&expression).await?;
        value.ok_or_else(|| CaseError::execution(format!("no element matches selector {selector}")))
    }

    /// The page's current location.
    pub async fn current_url(&self) -> CaseResult<String> {
        self.evaluate("window.location.href").await
    }

    /// Click into an input and type a value, as a user would.
    pub async fn fill(&self, selector: &str, value: &str) -> CaseResult<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| CaseError::execution(format!("no element matches selector {selector}: {e}")))?;
        element
            .click()
            .await
            .map_err(|e| CaseError::execution(format!("click on {selector} failed: {e}")))?;
        element
            .type_str(value)
            .await
            .map_err(|e| CaseError::execution(format!("typing into {selector} failed: {e}")))?;
        Ok(())
    }

    /// Click the first match for a selector.
    pub async fn click(&self, selector: &str) -> CaseResult<()> {
        self.click_nth(selector, 0).await
    }

    /// Click the index-th match for a selector, in document order.
    pub async fn click_nth(&self, selector: &str, index: usize) -> CaseResult<()> {
        let element = self.nth_element(selector, index).await?;
        element
            .click()
            .await
            .map_err(|e| CaseError::execution(format!("click on {selector}[{index}] failed: {e}")))?;
        Ok(())
    }

    /// Move the mouse over the index-th match, triggering `:hover` styling.
    pub async fn hover_nth(&self, selector: &str, index: usize) -> CaseResult<()> {
        let element = self.nth_element(selector, index).await?;
        element
            .scroll_into_view()
            .await
            .map_err(|e| CaseError::execution(format!("scroll to {selector}[{index}] failed: {e}")))?;
        let point = element
            .clickable_point()
            .await
            .map_err(|e| CaseError::execution(format!("{selector}[{index}] has no hoverable point: {e}")))?;
        let params = DispatchMouseEventParams::builder()
            .r#type(DispatchMouseEventType::MouseMoved)
            .x(point.x)
            .y(point.y)
            .build()
            .map_err(|e| CaseError::execution(e.to_string()))?;
        self.page
            .execute(params)
            .await
            .map_err(|e| CaseError::execution(format!("mouse move over {selector}[{index}] failed: {e}")))?;
        Ok(())
    }

    /// Poll until a selector matches, bounded by `deadline`.
    ///
    /// Returns whether the selector appeared. Use this when the deadline is
    /// itself the graded condition and a non-appearance should become an
    /// assertion failure rather than an execution error.
    pub async fn try_wait_for_selector(
        &self,
        selector: &str,
        deadline: Duration,
    ) -> CaseResult<bool> {
        let start = Instant::now();
        loop {
            if self.count(selector).await? > 0 {
                return Ok(true);
            }
            if start.elapsed() >= deadline {
                return Ok(false);
            }
            sleep(self.poll_interval).await;
        }
    }

    /// Poll until a selector matches; expiry is an execution error.
    pub async fn wait_for_selector(&self, selector: &str, deadline: Duration) -> CaseResult<()> {
        if self.try_wait_for_selector(selector, deadline).await? {
            Ok(())
        } else {
            Err(CaseError::execution(format!(
                "timed out after {}ms waiting for selector {selector}",
                deadline.as_millis()
            )))
        }
    }

    /// Poll until the page's location equals `expected`, bounded by
    /// `deadline`. Returns whether the location was reached.
    ///
    /// Evaluation failures while a navigation is in flight (the execution
    /// context is torn down between documents) count as "not there yet",
    /// not as case errors.
    pub async fn wait_for_url(&self, expected: &str, deadline: Duration) -> CaseResult<bool> {
        let start = Instant::now();
        loop {
            if matches!(self.current_url().await, Ok(url) if url == expected) {
                return Ok(true);
            }
            if start.elapsed() >= deadline {
                return Ok(false);
            }
            sleep(self.poll_interval).await;
        }
    }

    /// Give the page a moment to apply an interaction that is not expected
    /// to navigate (style recalculation, list mutation).
    pub async fn settle(&self, duration: Duration) {
        sleep(duration).await;
    }

    async fn nth_element(
        &self,
        selector: &str,
        index: usize,
    ) -> CaseResult<chromiumoxide::element::Element> {
        let mut elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| CaseError::execution(format!("no element matches selector {selector}: {e}")))?;
        if index >= elements.len() {
            return Err(CaseError::execution(format!(
                "selector {selector} matched {} elements, wanted index {index}",
                elements.len()
            )));
        }
        Ok(elements.swap_remove(index))
    }
}

/// Quote a raw string as a JavaScript string literal.
fn js_string(raw: &str) -> String {
    serde_json::Value::String(raw.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_quotes_selectors() {
        assert_eq!(js_string("form"), "\"form\"");
        assert_eq!(
            js_string("input[name='symbol1']"),
            "\"input[name='symbol1']\""
        );
        // Embedded double quotes must not break the generated script.
        assert_eq!(js_string(r#"a[href="/x"]"#), r#""a[href=\"/x\"]""#);
    }
}
