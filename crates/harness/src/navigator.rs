//! Per-case page reset
//!
//! Every case starts from a fresh load of its group's page. This isolates
//! page-load state between cases; it does NOT reset server-held state,
//! which belongs to the application under test.

use std::time::Duration;

use tokio::time::timeout;
use tracing::debug;

use crate::error::{CaseError, CaseResult};
use crate::session::BrowserSession;

/// Resets the session's page to a known URL before each case.
pub struct Navigator {
    nav_timeout: Duration,
}

impl Navigator {
    pub fn new(nav_timeout: Duration) -> Self {
        Self { nav_timeout }
    }

    /// Navigate the session's page to `path` and block until the load
    /// completes or the navigation timeout expires.
    ///
    /// A network error, a non-2xx root response, or a timeout becomes an
    /// execution error for the case about to run; the caller records it and
    /// continues with the group's remaining cases.
    pub async fn reset(&self, session: &BrowserSession, path: &str) -> CaseResult<()> {
        let url = session.absolute(path);
        debug!("resetting page to {url}");

        // CDP navigation does not surface the root document's HTTP status,
        // so probe it out-of-band first.
        let status = session.fetch_status(path).await?;
        if !(200..300).contains(&status) {
            return Err(CaseError::execution(format!(
                "page {url} returned status {status}"
            )));
        }

        match timeout(self.nav_timeout, session.page().goto(&url)).await {
            Ok(result) => result,
            Err(_) => Err(CaseError::execution(format!(
                "navigation to {url} did not complete within {}ms",
                self.nav_timeout.as_millis()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_success_statuses_are_rejected() {
        // The acceptance band is exactly 2xx.
        for status in [199_u16, 301, 404, 500] {
            assert!(!(200..300).contains(&status));
        }
        for status in [200_u16, 204, 299] {
            assert!((200..300).contains(&status));
        }
    }
}
