//! Runner configuration
//!
//! The grader's interface is flagless: every knob has a fixed default and
//! an environment override, never a command-line flag. The application
//! under test must already be running at `base_url`; the harness never
//! starts, stops, or health-checks it.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::group::TestGroup;
use crate::session::SessionConfig;

/// Where the application under test listens unless overridden.
pub const DEFAULT_BASE_URL: &str = "http://localhost:6543";

/// Where the grading platform reads the results document.
pub const DEFAULT_RESULTS_PATH: &str = "/autograder/results/results.json";

/// Fixed-default configuration for a grading run.
#[derive(Debug, Clone)]
pub struct GraderConfig {
    pub base_url: String,
    pub output_path: PathBuf,
    pub headless: bool,
    pub sandbox: bool,
    pub chrome_executable: Option<PathBuf>,
    pub nav_timeout: Duration,
    pub wait_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_RESULTS_PATH),
            headless: true,
            sandbox: false,
            chrome_executable: None,
            nav_timeout: Duration::from_secs(10),
            wait_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(100),
        }
    }
}

impl GraderConfig {
    /// Defaults with `WEBGRADE_*` environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = env::var("WEBGRADE_BASE_URL") {
            config.base_url = value;
        }
        if let Ok(value) = env::var("WEBGRADE_RESULTS_PATH") {
            config.output_path = PathBuf::from(value);
        }
        if let Ok(value) = env::var("WEBGRADE_CHROME") {
            config.chrome_executable = Some(PathBuf::from(value));
        }
        if env::var("WEBGRADE_HEADFUL").map(|v| v == "1").unwrap_or(false) {
            config.headless = false;
        }
        config
    }

    /// Session parameters for one group, applying its viewport override.
    pub fn session_config(&self, group: &TestGroup) -> SessionConfig {
        SessionConfig {
            base_url: self.base_url.clone(),
            headless: self.headless,
            sandbox: self.sandbox,
            viewport: group.viewport,
            chrome_executable: self.chrome_executable.clone(),
            nav_timeout: self.nav_timeout,
            wait_timeout: self.wait_timeout,
            poll_interval: self.poll_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GraderConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_RESULTS_PATH));
        assert!(config.headless);
        assert!(config.chrome_executable.is_none());
    }

    #[test]
    fn test_env_overrides() {
        // One combined test: from_env reads process-global state.
        env::set_var("WEBGRADE_BASE_URL", "http://127.0.0.1:9999");
        env::set_var("WEBGRADE_RESULTS_PATH", "/tmp/results.json");
        env::set_var("WEBGRADE_HEADFUL", "1");

        let config = GraderConfig::from_env();
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.output_path, PathBuf::from("/tmp/results.json"));
        assert!(!config.headless);

        env::remove_var("WEBGRADE_BASE_URL");
        env::remove_var("WEBGRADE_RESULTS_PATH");
        env::remove_var("WEBGRADE_HEADFUL");
    }

    #[test]
    fn test_session_config_applies_group_viewport() {
        let config = GraderConfig::default();
        let group = TestGroup::new("styles", "/world-clock", vec![]).with_viewport(1024, 768);
        let session = config.session_config(&group);
        assert_eq!(session.viewport.unwrap().width, 1024);
        assert_eq!(session.base_url, config.base_url);

        let plain = TestGroup::new("html", "/world-clock", vec![]);
        assert!(config.session_config(&plain).viewport.is_none());
    }
}
