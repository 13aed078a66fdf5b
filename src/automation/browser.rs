//! Chrome-backed automation driver
//!
//! [`BrowserSession`] owns one Chrome process, its CDP event handler task and
//! its profile directory. [`ChromiumDriver`] owns a session plus the single
//! page the workflow drives, launching both lazily on first use.

use anyhow::{Context, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use std::path::PathBuf;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{Automation, Locator};
use crate::browser_setup::launch_browser;
use crate::config::RegisterConfig;

/// Scoped ownership of one Chrome process
///
/// Release with [`BrowserSession::close`]. Dropping without closing aborts
/// the handler and removes a temporary profile directory, but Chrome may log
/// that it was not shut down cleanly.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserSession {
    /// Launch Chrome with the configured headless mode and profile directory
    pub async fn launch(config: &RegisterConfig) -> Result<Self> {
        let configured_dir = config.chrome_data_dir().map(PathBuf::from);
        // A configured profile belongs to the user and is never removed
        let owns_profile = configured_dir.is_none();
        let (browser, handler, user_data_dir) =
            launch_browser(config.headless(), configured_dir).await?;

        Ok(Self {
            browser,
            handler,
            user_data_dir: owns_profile.then_some(user_data_dir),
        })
    }

    /// Open a blank page in this browser
    pub async fn new_page(&self) -> Result<Page> {
        self.browser
            .new_page("about:blank")
            .await
            .context("Failed to create blank page")
    }

    /// Close Chrome, wait for the process to exit and remove the profile
    pub async fn close(mut self) {
        info!("Shutting down browser session");

        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        // Chrome must release its file handles before the profile goes away
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }

        self.cleanup_user_data_dir();
    }

    fn cleanup_user_data_dir(&mut self) {
        if let Some(path) = self.user_data_dir.take() {
            debug!("Removing browser profile directory {}", path.display());
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!(
                    "Failed to remove browser profile directory {}: {}",
                    path.display(),
                    e
                );
            }
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();

        if self.user_data_dir.is_some() {
            warn!("BrowserSession dropped without close() - removing profile directory in Drop");
            self.cleanup_user_data_dir();
        }
    }
}

/// [`Automation`] over a single Chrome page
///
/// Chrome is not launched on construction; [`Automation::start`] (or the first
/// browser operation) launches it, so cache hits never start a browser.
pub struct ChromiumDriver {
    config: RegisterConfig,
    active: Option<(BrowserSession, Page)>,
}

impl ChromiumDriver {
    #[must_use]
    pub fn new(config: RegisterConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    /// Whether Chrome has been launched
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Close the page and the browser, if running
    pub async fn shutdown(mut self) {
        if let Some((session, page)) = self.active.take() {
            if let Err(e) = page.close().await {
                debug!("Failed to close page: {}", e);
            }
            session.close().await;
        }
    }

    async fn page(&mut self) -> Result<&Page> {
        if self.active.is_none() {
            info!("Launching browser");
            let session = BrowserSession::launch(&self.config).await?;
            let page = session.new_page().await?;
            self.active = Some((session, page));
        }

        match &self.active {
            Some((_, page)) => Ok(page),
            None => anyhow::bail!("browser session unavailable"),
        }
    }
}

impl Automation for ChromiumDriver {
    async fn start(&mut self) -> Result<()> {
        self.page().await.map(|_| ())
    }

    async fn navigate(&mut self, url: &str) -> Result<()> {
        let page = self.page().await?;
        page.goto(url)
            .await
            .with_context(|| format!("Failed to navigate to {url}"))?;
        Ok(())
    }

    async fn is_present(&mut self, locator: &Locator) -> Result<bool> {
        let page = self.page().await?;
        Ok(page.find_element(locator.to_css()).await.is_ok())
    }

    async fn click(&mut self, locator: &Locator) -> Result<()> {
        let page = self.page().await?;
        page.find_element(locator.to_css())
            .await
            .with_context(|| format!("Element {locator} not found"))?
            .click()
            .await
            .with_context(|| format!("Failed to click {locator}"))?;
        Ok(())
    }

    async fn type_text(&mut self, locator: &Locator, text: &str) -> Result<()> {
        let page = self.page().await?;
        let element = page
            .find_element(locator.to_css())
            .await
            .with_context(|| format!("Element {locator} not found"))?;
        element
            .click()
            .await
            .with_context(|| format!("Failed to focus {locator}"))?;
        element
            .type_str(text)
            .await
            .with_context(|| format!("Failed to type into {locator}"))?;
        Ok(())
    }

    async fn execute_script(&mut self, script: &str) -> Result<()> {
        let page = self.page().await?;
        page.evaluate(script)
            .await
            .context("Failed to evaluate script")?;
        Ok(())
    }

    async fn title(&mut self) -> Result<Option<String>> {
        let page = self.page().await?;
        page.get_title().await.context("Failed to read page title")
    }

    async fn page_source(&mut self) -> Result<String> {
        let page = self.page().await?;
        page.content().await.context("Failed to read page content")
    }
}
