//! Browser automation seam
//!
//! The search workflow only needs a handful of operations from a browser:
//! navigate, find elements by id/name, click, type, run a script and return
//! the rendered markup. [`Automation`] captures exactly that, so the workflow
//! can run against Chrome ([`ChromiumDriver`]) or a scripted test double.

mod browser;

pub use browser::{BrowserSession, ChromiumDriver};

use anyhow::Result;
use std::fmt;

/// How a workflow step finds its element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// `id` attribute; JSF ids contain `:` so they are matched as attributes
    Id(String),
    /// `name` attribute
    Name(String),
    /// Raw CSS selector
    Css(String),
}

impl Locator {
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// CSS selector matching this locator
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Id(id) => format!("[id=\"{}\"]", escape_attr_value(id)),
            Self::Name(name) => format!("[name=\"{}\"]", escape_attr_value(name)),
            Self::Css(selector) => selector.clone(),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::Name(name) => write!(f, "name={name}"),
            Self::Css(selector) => write!(f, "css={selector}"),
        }
    }
}

fn escape_attr_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Operations the search workflow performs on a browser
///
/// All methods take `&mut self`: a driver is one exclusively owned browser
/// page and never serves two workflows at once. Errors are plain
/// `anyhow` errors; the workflow attaches the failing step.
#[allow(async_fn_in_trait)]
pub trait Automation {
    /// Acquire the underlying browser; called once before the first workflow
    async fn start(&mut self) -> Result<()> {
        Ok(())
    }

    /// Load `url` in the current page
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Whether an element matching `locator` currently exists
    async fn is_present(&mut self, locator: &Locator) -> Result<bool>;

    /// Click the first element matching `locator`
    async fn click(&mut self, locator: &Locator) -> Result<()>;

    /// Focus the element matching `locator` and type `text` into it
    async fn type_text(&mut self, locator: &Locator, text: &str) -> Result<()>;

    /// Evaluate a script in the page, discarding its value
    async fn execute_script(&mut self, script: &str) -> Result<()>;

    /// Title of the current page
    async fn title(&mut self) -> Result<Option<String>>;

    /// Markup of the current page as rendered
    async fn page_source(&mut self) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jsf_ids_become_attribute_selectors() {
        assert_eq!(
            Locator::id("form:schlagwoerter").to_css(),
            r#"[id="form:schlagwoerter"]"#
        );
        assert_eq!(Locator::name("form").to_css(), r#"[name="form"]"#);
        assert_eq!(Locator::css("table[role='grid']").to_css(), "table[role='grid']");
    }

    #[test]
    fn quotes_in_ids_are_escaped() {
        assert_eq!(Locator::id(r#"a"b"#).to_css(), r#"[id="a\"b"]"#);
    }

    #[test]
    fn display_names_the_locator_kind() {
        assert_eq!(Locator::id("form:btnSuche").to_string(), "id=form:btnSuche");
    }
}
