//! Core configuration types for register searches

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::KeyScheme;
use crate::parser::RowPolicy;
use crate::utils::{
    DEFAULT_CACHE_DIR, DEFAULT_ELEMENT_TIMEOUT, DEFAULT_FORM_TIMEOUT, DEFAULT_NAVIGATION_TIMEOUT,
    DEFAULT_POLL_INTERVAL, DEFAULT_RESULTS_TIMEOUT, PORTAL_URL,
};

/// What the workflow does with the query's match mode
///
/// Earlier releases accepted the keyword option but never set
/// it on the form, so the portal always used its default ("all"). `Ignore`
/// reproduces that; `Apply` selects the matching radio button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchModeHandling {
    #[default]
    Ignore,
    Apply,
}

/// Upper bounds for each kind of workflow wait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTimeouts {
    /// Page loads and page capture
    pub navigation: Duration,
    /// Locating a single form element
    pub element: Duration,
    /// Search form availability after opening advanced search
    pub form: Duration,
    /// Result grid rendering after submit
    pub results: Duration,
}

impl Default for StepTimeouts {
    fn default() -> Self {
        Self {
            navigation: DEFAULT_NAVIGATION_TIMEOUT,
            element: DEFAULT_ELEMENT_TIMEOUT,
            form: DEFAULT_FORM_TIMEOUT,
            results: DEFAULT_RESULTS_TIMEOUT,
        }
    }
}

/// Retry policy around the browser workflow
///
/// Default is a single attempt: the portal is rate limited and hammering it
/// with retries gets the client blocked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Backoff multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Maximum retry delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Calculate delay before retry number `attempt` (0-based)
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let multiplier = self.backoff_multiplier.powi(attempt as i32);
        let delay_ms = (self.initial_delay.as_millis() as f64 * multiplier) as u64;
        Duration::from_millis(delay_ms).min(self.max_delay)
    }
}

/// Settings for the search pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterConfig {
    pub(crate) portal_url: String,
    pub(crate) cache_dir: PathBuf,
    pub(crate) key_scheme: KeyScheme,
    pub(crate) headless: bool,
    /// Chrome profile directory; a per-process temp directory when unset
    pub(crate) chrome_data_dir: Option<PathBuf>,
    pub(crate) timeouts: StepTimeouts,
    pub(crate) poll_interval: Duration,
    pub(crate) match_mode_handling: MatchModeHandling,
    pub(crate) row_policy: RowPolicy,
    pub(crate) retry: RetryPolicy,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            portal_url: PORTAL_URL.to_string(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            key_scheme: KeyScheme::default(),
            headless: true,
            chrome_data_dir: None,
            timeouts: StepTimeouts::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            match_mode_handling: MatchModeHandling::default(),
            row_policy: RowPolicy::default(),
            retry: RetryPolicy::default(),
        }
    }
}

impl RegisterConfig {
    #[must_use]
    pub fn builder() -> super::RegisterConfigBuilder {
        super::RegisterConfigBuilder::default()
    }

    #[must_use]
    pub fn portal_url(&self) -> &str {
        &self.portal_url
    }

    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    #[must_use]
    pub fn key_scheme(&self) -> KeyScheme {
        self.key_scheme
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn chrome_data_dir(&self) -> Option<&Path> {
        self.chrome_data_dir.as_deref()
    }

    #[must_use]
    pub fn timeouts(&self) -> &StepTimeouts {
        &self.timeouts
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    #[must_use]
    pub fn match_mode_handling(&self) -> MatchModeHandling {
        self.match_mode_handling
    }

    #[must_use]
    pub fn row_policy(&self) -> RowPolicy {
        self.row_policy
    }

    #[must_use]
    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }
}
