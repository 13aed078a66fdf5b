//! Search the German shared company register (handelsregister.de)
//!
//! A search drives the portal's advanced search form in Chrome, caches the
//! rendered result page on disk and parses the result grid into
//! [`CompanyRecord`]s. Repeated searches for the same keywords are served
//! from the cache without starting a browser.

pub mod automation;
pub mod browser_setup;
pub mod cache;
pub mod cancel;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod parser;
pub mod utils;

pub use automation::{Automation, BrowserSession, ChromiumDriver, Locator};
pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use cache::{CacheKey, FsPageCache, KeyScheme, PageCache};
pub use cancel::{CancelHandle, Cancellation, cancellation};
pub use config::{MatchModeHandling, RegisterConfig, RegisterConfigBuilder, RetryPolicy, StepTimeouts};
pub use error::{RegisterError, RegisterResult};
pub use model::{CompanyRecord, HistoryEntry, MatchMode, SearchQuery, SearchResultSet};
pub use orchestrator::{SearchOrchestrator, WorkflowStep};
pub use parser::{RowPolicy, parse_results, parse_results_with};
