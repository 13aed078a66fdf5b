//! Test utilities for the handelsregister test suite

use anyhow::{Result, bail};
use handelsregister::utils::{RESULTS_GRID_SELECTOR, SEARCH_BUTTON_ID};
use handelsregister::{Automation, CancelHandle, Locator, RegisterConfig, StepTimeouts};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Cells of one result row: eight fixed cells then one triple per history entry
#[allow(dead_code)]
pub fn company_cells(
    court: &str,
    name: &str,
    state: &str,
    status: &str,
    history: &[(&str, &str)],
) -> Vec<String> {
    let mut cells: Vec<String> = ["", court, name, state, status, "ADCDHDDKUTVÖSI", "", ""]
        .iter()
        .map(ToString::to_string)
        .collect();
    for (former_name, location) in history {
        cells.push((*former_name).to_string());
        cells.push((*location).to_string());
        cells.push(String::new());
    }
    cells
}

/// A `<tr data-ri=..>` row with one `<td>` per cell
#[allow(dead_code)]
pub fn result_row(index: &str, cells: &[String]) -> String {
    let tds: String = cells
        .iter()
        .map(|cell| format!("<td role=\"gridcell\">{}</td>", html_escape::encode_text(cell)))
        .collect();
    format!(r#"<tr data-ri="{index}" class="ui-widget-content">{tds}</tr>"#)
}

/// A result page with the given rows inside the results grid
#[allow(dead_code)]
pub fn results_page(rows: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="de">
<head><title>Handelsregister - Suchergebnisse</title></head>
<body>
<form id="ergebnissForm" name="ergebnissForm">
  <div id="ergebnissForm:selectedSuchErgebnisFormTable" class="ui-datatable">
    <table role="grid">
      <thead><tr><th>Registerart</th><th>Firma</th><th>Sitz</th><th>Status</th></tr></thead>
      <tbody id="ergebnissForm:selectedSuchErgebnisFormTable_data">
{}
      </tbody>
    </table>
  </div>
</form>
</body>
</html>"#,
        rows.join("\n")
    )
}

/// What the portal returns for "Gasag AG"
#[allow(dead_code)]
pub fn gasag_page() -> String {
    results_page(&[
        result_row(
            "0",
            &company_cells(
                "Berlin District court Berlin (Charlottenburg) HRB 44343",
                "Gasag AG",
                "Berlin",
                "currently registered",
                &[("1.) GASAG Berliner Gaswerke Aktiengesellschaft", "1.) Berlin")],
            ),
        ),
        result_row(
            "1",
            &company_cells(
                "Berlin District court Berlin (Charlottenburg) HRB 174543",
                "GASAG Solution Plus GmbH",
                "Berlin",
                "currently registered",
                &[],
            ),
        ),
    ])
}

/// Configuration with short waits and the cache under `cache_dir`
#[allow(dead_code)]
pub fn fast_config(cache_dir: &Path) -> RegisterConfig {
    RegisterConfig::builder()
        .cache_dir(cache_dir)
        .timeouts(StepTimeouts {
            navigation: Duration::from_secs(1),
            element: Duration::from_millis(200),
            form: Duration::from_millis(200),
            results: Duration::from_millis(300),
        })
        .poll_interval(Duration::from_millis(5))
        .build()
        .unwrap()
}

/// Scripted stand-in for the portal
///
/// Every element is present except those in `missing`. The results grid only
/// appears once the search button was clicked, and not before the
/// `grid_after_navigations`-th page load.
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct MockDriver {
    pub result_page: String,
    pub missing: HashSet<Locator>,
    pub grid_after_navigations: usize,
    pub hang_on_navigate: bool,
    /// Cancelled as the result page is handed over
    pub cancel_on_capture: Option<CancelHandle>,

    pub starts: usize,
    pub navigations: usize,
    pub clicks: Vec<Locator>,
    pub typed: Vec<String>,
    pub scripts: usize,
    pub title_reads: usize,
    submitted: bool,
}

#[allow(dead_code)]
impl MockDriver {
    pub fn returning(result_page: String) -> Self {
        Self {
            result_page,
            ..Self::default()
        }
    }

    pub fn without(mut self, locator: Locator) -> Self {
        self.missing.insert(locator);
        self
    }

    pub fn grid_after_navigations(mut self, navigations: usize) -> Self {
        self.grid_after_navigations = navigations;
        self
    }

    pub fn hanging(mut self) -> Self {
        self.hang_on_navigate = true;
        self
    }

    pub fn cancelling_on_capture(mut self, handle: CancelHandle) -> Self {
        self.cancel_on_capture = Some(handle);
        self
    }

    /// Whether any workflow step touched the browser
    pub fn was_used(&self) -> bool {
        self.starts > 0 || self.navigations > 0
    }

    pub fn clicked(&self, locator: &Locator) -> bool {
        self.clicks.contains(locator)
    }

    fn grid_visible(&self) -> bool {
        self.submitted && self.navigations >= self.grid_after_navigations
    }
}

impl Automation for MockDriver {
    async fn start(&mut self) -> Result<()> {
        self.starts += 1;
        Ok(())
    }

    async fn navigate(&mut self, _url: &str) -> Result<()> {
        if self.hang_on_navigate {
            std::future::pending::<()>().await;
        }
        self.navigations += 1;
        self.submitted = false;
        Ok(())
    }

    async fn is_present(&mut self, locator: &Locator) -> Result<bool> {
        if self.missing.contains(locator) {
            return Ok(false);
        }
        if *locator == Locator::css(RESULTS_GRID_SELECTOR) {
            return Ok(self.grid_visible());
        }
        Ok(true)
    }

    async fn click(&mut self, locator: &Locator) -> Result<()> {
        if self.missing.contains(locator) {
            bail!("no element matches {locator}");
        }
        if *locator == Locator::id(SEARCH_BUTTON_ID) {
            self.submitted = true;
        }
        self.clicks.push(locator.clone());
        Ok(())
    }

    async fn type_text(&mut self, locator: &Locator, text: &str) -> Result<()> {
        if self.missing.contains(locator) {
            bail!("no element matches {locator}");
        }
        self.typed.push(text.to_string());
        Ok(())
    }

    async fn execute_script(&mut self, _script: &str) -> Result<()> {
        self.scripts += 1;
        Ok(())
    }

    async fn title(&mut self) -> Result<Option<String>> {
        self.title_reads += 1;
        Ok(Some("Handelsregister - Erweiterte Suche".to_string()))
    }

    async fn page_source(&mut self) -> Result<String> {
        if self.grid_visible() {
            if let Some(handle) = &self.cancel_on_capture {
                handle.cancel();
            }
            Ok(self.result_page.clone())
        } else {
            Ok("<html><body><form name=\"form\"></form></body></html>".to_string())
        }
    }
}
