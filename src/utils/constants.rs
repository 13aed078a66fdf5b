//! Shared configuration constants for the register client
//!
//! Portal element locators, result grid layout and default timeouts live here
//! so the workflow, the parser and the configuration builder agree on them.

use std::time::Duration;

/// Start page of the shared register portal
pub const PORTAL_URL: &str = "https://www.handelsregister.de";

/// Directory (relative to the working directory) holding cached result pages
pub const DEFAULT_CACHE_DIR: &str = "cache";

/// Chrome user agent string sent by the automated browser
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

// =============================================================================
// Portal element locators
// =============================================================================

/// Navigation link opening the advanced search form
pub const ADVANCED_SEARCH_LINK_ID: &str = "naviForm:erweiterteSucheLink";

/// `name` attribute of the advanced search form
pub const SEARCH_FORM_NAME: &str = "form";

/// Keyword text input inside the search form
pub const KEYWORDS_INPUT_ID: &str = "form:schlagwoerter";

/// Id prefix of the keyword option radio buttons; the option index is appended
/// as `:<index>` (0 = all, 1 = min, 2 = exact)
pub const KEYWORD_OPTION_ID_PREFIX: &str = "form:schlagwortOptionen";

/// Form heading clicked before submitting, closes the keyword autocomplete
pub const SEARCH_FORM_LABEL_ID: &str = "form:erweiterteSucheLabel";

/// Submit button of the advanced search form
pub const SEARCH_BUTTON_ID: &str = "form:btnSuche";

/// Scrolls the submit button into the viewport
pub const SCROLL_TO_BOTTOM_JS: &str = "window.scrollTo(0, document.body.scrollHeight);";

// =============================================================================
// Result grid layout
// =============================================================================

/// CSS selector of the results table
pub const RESULTS_GRID_SELECTOR: &str = "table[role='grid']";

/// Attribute carrying the position of a row in the result ordering
pub const ROW_INDEX_ATTR: &str = "data-ri";

/// Number of fixed leading cells in every result row
pub const FIXED_COLUMNS: usize = 8;

/// Cells contributed by one history entry (name, location, unused)
pub const HISTORY_GROUP_SIZE: usize = 3;

// =============================================================================
// Waits
// =============================================================================

/// Page navigation and page capture
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Locating a single form element
pub const DEFAULT_ELEMENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Advanced search form becoming available after the navigation click
pub const DEFAULT_FORM_TIMEOUT: Duration = Duration::from_secs(10);

/// Result grid rendering after submit
///
/// The portal renders results with JavaScript and regularly takes more than
/// ten seconds under load.
pub const DEFAULT_RESULTS_TIMEOUT: Duration = Duration::from_secs(45);

/// Interval between element presence checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);
