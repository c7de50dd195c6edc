//! Browser session lifecycle
//!
//! One session per test group: one browser process, one page, one HTTP
//! client. The session is opened before the group's first case and closed
//! exactly once after its last, regardless of case outcomes.

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{CaseError, CaseResult, HarnessError, HarnessResult};
use crate::page::PageHandle;

/// Browser window dimensions for a group that needs a fixed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Parameters for opening one browser session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Address where the application under test is already running.
    pub base_url: String,
    pub headless: bool,
    /// Chromium's sandbox; disabled by default because graders commonly run
    /// in containers without the required privileges.
    pub sandbox: bool,
    pub viewport: Option<Viewport>,
    /// Explicit chromium-family executable; auto-detected when `None`.
    pub chrome_executable: Option<PathBuf>,
    pub nav_timeout: Duration,
    pub wait_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:6543".to_string(),
            headless: true,
            sandbox: false,
            viewport: None,
            chrome_executable: None,
            nav_timeout: Duration::from_secs(10),
            wait_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(100),
        }
    }
}

/// An open browser with a single page, exclusively owned by one test group.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: PageHandle,
    http: reqwest::Client,
    base_url: String,
}

impl BrowserSession {
    /// Launch the browser and open the page this group's cases will share.
    pub async fn open(config: &SessionConfig) -> HarnessResult<Self> {
        let mut builder = BrowserConfig::builder();
        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(viewport) = &config.viewport {
            builder = builder.window_size(viewport.width, viewport.height);
        }
        if let Some(path) = &config.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        let browser_config = builder
            .build()
            .map_err(|e| HarnessError::Session(e.to_string()))?;
        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| HarnessError::Session(format!("browser launch failed: {e}")))?;

        // The handler stream must be drained for CDP traffic to flow.
        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| HarnessError::Session(format!("page could not be opened: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(config.nav_timeout)
            .build()
            .map_err(|e| HarnessError::Session(format!("http client build failed: {e}")))?;

        debug!("browser session opened against {}", config.base_url);

        Ok(Self {
            browser,
            handler: handle,
            page: PageHandle::new(page, config.wait_timeout, config.poll_interval),
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The single page handle this session owns.
    pub fn page(&self) -> &PageHandle {
        &self.page
    }

    /// Address of the application under test, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a path against the application's base URL.
    pub fn absolute(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Status of a plain GET against the application, without body decoding.
    pub async fn fetch_status(&self, path: &str) -> CaseResult<u16> {
        let url = self.absolute(path);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| CaseError::execution(format!("GET {url} failed: {e}")))?;
        Ok(response.status().as_u16())
    }

    /// GET a JSON endpoint of the application under test.
    pub async fn fetch_json(&self, path: &str) -> CaseResult<(u16, Value)> {
        let url = self.absolute(path);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| CaseError::execution(format!("GET {url} failed: {e}")))?;
        let status = response.status().as_u16();
        let body = response
            .json::<Value>()
            .await
            .map_err(|e| CaseError::execution(format!("GET {url} returned a non-JSON body: {e}")))?;
        Ok((status, body))
    }

    /// Close the browser and stop the event handler task.
    pub async fn close(mut self) -> HarnessResult<()> {
        if let Err(e) = self.browser.close().await {
            warn!("browser did not close cleanly: {e}");
        }
        self.handler.abort();
        debug!("browser session closed");
        Ok(())
    }
}

/// Join a path onto a base URL; absolute URLs pass through untouched.
fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert!(config.headless);
        assert!(!config.sandbox);
        assert_eq!(config.base_url, "http://localhost:6543");
        assert_eq!(config.wait_timeout, Duration::from_secs(5));
        assert!(config.viewport.is_none());
    }

    #[test]
    fn test_join_url() {
        let base = "http://localhost:6543";
        assert_eq!(join_url(base, "/stock"), "http://localhost:6543/stock");
        assert_eq!(join_url(base, "stock"), "http://localhost:6543/stock");
        assert_eq!(
            join_url(base, "http://other:1234/x"),
            "http://other:1234/x"
        );
    }
}
