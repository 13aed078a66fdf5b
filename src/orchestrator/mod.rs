//! Search orchestration
//!
//! [`SearchOrchestrator`] ties the cache, the browser workflow and the parser
//! together: a cached page is parsed directly, otherwise the portal is driven
//! through its search form and the captured page is cached before parsing.

mod retry;
mod workflow;

pub use workflow::WorkflowStep;

use tracing::{debug, info, warn};

use crate::automation::{Automation, ChromiumDriver};
use crate::cache::{FsPageCache, PageCache};
use crate::cancel::Cancellation;
use crate::config::RegisterConfig;
use crate::error::{RegisterError, RegisterResult};
use crate::model::{SearchQuery, SearchResultSet};
use crate::parser::parse_results_with;

/// Runs register searches, one at a time
///
/// Owns its browser driver exclusively; `search` takes `&mut self`.
pub struct SearchOrchestrator<A: Automation, C: PageCache> {
    driver: A,
    cache: C,
    config: RegisterConfig,
    cancellation: Cancellation,
    started: bool,
}

impl<A: Automation, C: PageCache> SearchOrchestrator<A, C> {
    pub fn new(driver: A, cache: C, config: RegisterConfig) -> Self {
        Self {
            driver,
            cache,
            config,
            cancellation: Cancellation::never(),
            started: false,
        }
    }

    /// Abort searches when `cancellation` fires
    #[must_use]
    pub fn with_cancellation(mut self, cancellation: Cancellation) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn driver(&self) -> &A {
        &self.driver
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn config(&self) -> &RegisterConfig {
        &self.config
    }

    pub fn into_parts(self) -> (A, C) {
        (self.driver, self.cache)
    }

    /// Return the companies matching `query`
    ///
    /// Served from the cache unless the query forces a refresh. A fetched
    /// page is cached before it is parsed, so a parse failure still leaves
    /// the page on disk for inspection. Cancellation before the cache write
    /// leaves the cache untouched.
    pub async fn search(&mut self, query: &SearchQuery) -> RegisterResult<SearchResultSet> {
        let key = query.cache_key(self.config.key_scheme())?;
        if self.cancellation.is_cancelled() {
            return Err(RegisterError::Cancelled);
        }

        let cached = if query.force_refresh() {
            info!("Forced refresh, skipping cache lookup for '{}'", key);
            None
        } else {
            self.cancellation.guard(self.cache.get(&key)).await?
        };

        let page = match cached {
            Some(page) => {
                info!("Cache hit for '{}'", key);
                page
            }
            None => {
                debug!("Cache miss for '{}'", key);
                let page = self.fetch(query).await?;

                if self.cancellation.is_cancelled() {
                    return Err(RegisterError::Cancelled);
                }
                self.cache.put(&key, &page).await?;
                debug!("Cached result page under '{}'", key);
                page
            }
        };

        parse_results_with(&page, self.config.row_policy())
    }

    /// Run the browser workflow, retrying timeouts per the retry policy
    async fn fetch(&mut self, query: &SearchQuery) -> RegisterResult<String> {
        let Self {
            driver,
            config,
            cancellation,
            started,
            ..
        } = self;

        if !*started {
            cancellation
                .guard(async { driver.start().await.map_err(RegisterError::from) })
                .await?;
            *started = true;
        }

        let policy = config.retry();
        let mut attempt = 0;
        loop {
            match workflow::capture_result_page(driver, config, cancellation, query).await {
                Ok(page) => return Ok(page),
                Err(e) if e.is_retryable() && attempt + 1 < policy.max_attempts => {
                    let delay = retry::jittered_delay(policy, attempt);
                    warn!(
                        "Attempt {}/{} failed, retrying in {:?}: {}",
                        attempt + 1,
                        policy.max_attempts,
                        delay,
                        e
                    );
                    cancellation
                        .guard(async {
                            tokio::time::sleep(delay).await;
                            Ok(())
                        })
                        .await?;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl SearchOrchestrator<ChromiumDriver, FsPageCache> {
    /// Chrome-backed orchestrator caching under the configured directory
    ///
    /// Chrome is launched on the first cache miss.
    #[must_use]
    pub fn chromium(config: RegisterConfig) -> Self {
        let cache = FsPageCache::new(config.cache_dir());
        let driver = ChromiumDriver::new(config.clone());
        Self::new(driver, cache, config)
    }

    /// Close the browser if one was launched
    pub async fn shutdown(self) {
        let (driver, _) = self.into_parts();
        driver.shutdown().await;
    }
}
