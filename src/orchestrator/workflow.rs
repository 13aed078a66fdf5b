//! The portal's search form, driven step by step
//!
//! Every step runs under its own time limit and fails with an
//! [`RegisterError::Automation`] naming the step. Waits poll for the element
//! they need instead of sleeping a fixed time.

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::automation::{Automation, Locator};
use crate::cancel::Cancellation;
use crate::config::{MatchModeHandling, RegisterConfig};
use crate::error::{RegisterError, RegisterResult};
use crate::model::SearchQuery;
use crate::utils::{
    ADVANCED_SEARCH_LINK_ID, KEYWORD_OPTION_ID_PREFIX, KEYWORDS_INPUT_ID, RESULTS_GRID_SELECTOR,
    SCROLL_TO_BOTTOM_JS, SEARCH_BUTTON_ID, SEARCH_FORM_LABEL_ID, SEARCH_FORM_NAME,
};

/// Named steps of a portal search, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowStep {
    OpenStartPage,
    OpenAdvancedSearch,
    AwaitSearchForm,
    EnterKeywords,
    SelectMatchMode,
    SubmitSearch,
    AwaitResults,
    CapturePage,
}

impl WorkflowStep {
    pub const ALL: [WorkflowStep; 8] = [
        Self::OpenStartPage,
        Self::OpenAdvancedSearch,
        Self::AwaitSearchForm,
        Self::EnterKeywords,
        Self::SelectMatchMode,
        Self::SubmitSearch,
        Self::AwaitResults,
        Self::CapturePage,
    ];

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::OpenStartPage => "open start page",
            Self::OpenAdvancedSearch => "open advanced search",
            Self::AwaitSearchForm => "wait for search form",
            Self::EnterKeywords => "enter keywords",
            Self::SelectMatchMode => "select keyword option",
            Self::SubmitSearch => "submit search",
            Self::AwaitResults => "wait for results",
            Self::CapturePage => "capture result page",
        }
    }

    fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|step| *step == self)
            .unwrap_or_default()
            + 1
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Run one step under `limit`, tagging any failure with the step
async fn run_step<T>(
    step: WorkflowStep,
    limit: Duration,
    cancellation: &Cancellation,
    fut: impl Future<Output = anyhow::Result<T>>,
) -> RegisterResult<T> {
    debug!(
        "Step {}/{}: {}",
        step.position(),
        WorkflowStep::ALL.len(),
        step
    );

    cancellation
        .guard(async {
            match tokio::time::timeout(limit, fut).await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => Err(RegisterError::automation(step, format!("{e:#}"))),
                Err(_) => Err(RegisterError::step_timeout(step, limit)),
            }
        })
        .await
}

/// Poll until `locator` matches; the caller bounds the wait
async fn wait_for<A: Automation>(
    driver: &mut A,
    locator: &Locator,
    poll_interval: Duration,
) -> anyhow::Result<()> {
    let start = Instant::now();
    loop {
        if driver.is_present(locator).await? {
            debug!("{} present after {:?}", locator, start.elapsed());
            return Ok(());
        }
        tokio::time::sleep(poll_interval).await;
    }
}

async fn wait_and_click<A: Automation>(
    driver: &mut A,
    locator: &Locator,
    poll_interval: Duration,
) -> anyhow::Result<()> {
    wait_for(driver, locator, poll_interval).await?;
    driver.click(locator).await
}

/// Title of the current page for diagnostics
///
/// A failed or slow read is logged and yields `None`; only cancellation is an
/// error.
async fn page_title<A: Automation>(
    driver: &mut A,
    limit: Duration,
    cancellation: &Cancellation,
) -> RegisterResult<Option<String>> {
    cancellation
        .guard(async {
            Ok(match tokio::time::timeout(limit, driver.title()).await {
                Ok(Ok(title)) => title,
                Ok(Err(e)) => {
                    debug!("Could not read page title: {:#}", e);
                    None
                }
                Err(_) => {
                    debug!("Reading page title timed out after {:?}", limit);
                    None
                }
            })
        })
        .await
}

/// Drive one search through the portal and return the rendered result page
///
/// The driver must already be started. Nothing is cached here.
pub(crate) async fn capture_result_page<A: Automation>(
    driver: &mut A,
    config: &RegisterConfig,
    cancellation: &Cancellation,
    query: &SearchQuery,
) -> RegisterResult<String> {
    let timeouts = *config.timeouts();
    let poll = config.poll_interval();

    info!("Searching the register for '{}'", query.keywords());

    run_step(
        WorkflowStep::OpenStartPage,
        timeouts.navigation,
        cancellation,
        driver.navigate(config.portal_url()),
    )
    .await?;

    let advanced_search = Locator::id(ADVANCED_SEARCH_LINK_ID);
    run_step(
        WorkflowStep::OpenAdvancedSearch,
        timeouts.element,
        cancellation,
        wait_and_click(driver, &advanced_search, poll),
    )
    .await?;

    if tracing::enabled!(tracing::Level::DEBUG)
        && let Some(title) = page_title(driver, timeouts.element, cancellation).await?
    {
        debug!("Page title: {}", title);
    }

    let form = Locator::name(SEARCH_FORM_NAME);
    run_step(
        WorkflowStep::AwaitSearchForm,
        timeouts.form,
        cancellation,
        wait_for(driver, &form, poll),
    )
    .await?;

    let keywords = Locator::id(KEYWORDS_INPUT_ID);
    run_step(
        WorkflowStep::EnterKeywords,
        timeouts.element,
        cancellation,
        async {
            wait_for(driver, &keywords, poll).await?;
            // Same spelling the cache key is derived from
            driver.type_text(&keywords, &query.normalized_keywords()).await
        },
    )
    .await?;

    match config.match_mode_handling() {
        MatchModeHandling::Apply => {
            let option = Locator::id(format!(
                "{KEYWORD_OPTION_ID_PREFIX}:{}",
                query.match_mode().option_index()
            ));
            run_step(
                WorkflowStep::SelectMatchMode,
                timeouts.element,
                cancellation,
                wait_and_click(driver, &option, poll),
            )
            .await?;
        }
        MatchModeHandling::Ignore => {
            debug!(
                "Keyword option '{}' not applied, portal default is used",
                query.match_mode()
            );
        }
    }

    let label = Locator::id(SEARCH_FORM_LABEL_ID);
    let submit = Locator::id(SEARCH_BUTTON_ID);
    run_step(
        WorkflowStep::SubmitSearch,
        timeouts.element,
        cancellation,
        async {
            driver.click(&label).await?;
            driver.execute_script(SCROLL_TO_BOTTOM_JS).await?;
            wait_and_click(driver, &submit, poll).await
        },
    )
    .await?;

    let grid = Locator::css(RESULTS_GRID_SELECTOR);
    run_step(
        WorkflowStep::AwaitResults,
        timeouts.results,
        cancellation,
        wait_for(driver, &grid, poll),
    )
    .await?;

    let page = run_step(
        WorkflowStep::CapturePage,
        timeouts.navigation,
        cancellation,
        driver.page_source(),
    )
    .await?;

    info!("Captured result page ({} bytes)", page.len());
    Ok(page)
}
