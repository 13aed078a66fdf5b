//! Fluent builder for `RegisterConfig`
//!
//! Every field has a default, so `build()` only validates: timeouts must be
//! non-zero, the portal URL must parse and at least one attempt is required.

use std::path::PathBuf;
use std::time::Duration;

use super::types::{MatchModeHandling, RegisterConfig, RetryPolicy, StepTimeouts};
use crate::cache::KeyScheme;
use crate::error::{RegisterError, RegisterResult};
use crate::parser::RowPolicy;

#[derive(Debug, Clone, Default)]
pub struct RegisterConfigBuilder {
    config: RegisterConfig,
}

impl RegisterConfigBuilder {
    #[must_use]
    pub fn portal_url(mut self, url: impl Into<String>) -> Self {
        self.config.portal_url = url.into();
        self
    }

    #[must_use]
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.cache_dir = dir.into();
        self
    }

    #[must_use]
    pub fn key_scheme(mut self, scheme: KeyScheme) -> Self {
        self.config.key_scheme = scheme;
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    #[must_use]
    pub fn chrome_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.chrome_data_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn timeouts(mut self, timeouts: StepTimeouts) -> Self {
        self.config.timeouts = timeouts;
        self
    }

    #[must_use]
    pub fn results_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeouts.results = timeout;
        self
    }

    #[must_use]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    #[must_use]
    pub fn match_mode_handling(mut self, handling: MatchModeHandling) -> Self {
        self.config.match_mode_handling = handling;
        self
    }

    #[must_use]
    pub fn row_policy(mut self, policy: RowPolicy) -> Self {
        self.config.row_policy = policy;
        self
    }

    #[must_use]
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    pub fn build(self) -> RegisterResult<RegisterConfig> {
        let config = self.config;

        let url = url::Url::parse(&config.portal_url).map_err(|e| {
            RegisterError::Config(format!("invalid portal URL '{}': {e}", config.portal_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RegisterError::Config(format!(
                "portal URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        let StepTimeouts {
            navigation,
            element,
            form,
            results,
        } = config.timeouts;
        for (name, value) in [
            ("navigation", navigation),
            ("element", element),
            ("form", form),
            ("results", results),
            ("poll interval", config.poll_interval),
        ] {
            if value.is_zero() {
                return Err(RegisterError::Config(format!("{name} timeout must be non-zero")));
            }
        }

        if config.retry.max_attempts == 0 {
            return Err(RegisterError::Config(
                "retry policy needs at least one attempt".to_string(),
            ));
        }
        if config.retry.backoff_multiplier < 1.0 {
            return Err(RegisterError::Config(format!(
                "backoff multiplier must be >= 1.0, got {}",
                config.retry.backoff_multiplier
            )));
        }

        Ok(config)
    }
}
