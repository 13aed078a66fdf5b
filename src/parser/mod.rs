//! Result grid extraction
//!
//! Turns one captured result page into ordered company records. The portal
//! renders results as a PrimeFaces data table: a `table[role=grid]` whose data
//! rows carry a `data-ri` row index. Each data row has eight fixed cells
//! followed by zero or more history triples:
//!
//! | index | content                               |
//! |-------|---------------------------------------|
//! | 0     | expander (ignored)                    |
//! | 1     | register court                        |
//! | 2     | company name                          |
//! | 3     | federal state                         |
//! | 4     | status                                |
//! | 5     | documents indicator                   |
//! | 6, 7  | layout cells (ignored)                |
//! | 8+3k  | history name, location, unused cell   |

mod row;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::error::{RegisterError, RegisterResult};
use crate::model::SearchResultSet;
use crate::utils::{RESULTS_GRID_SELECTOR, ROW_INDEX_ATTR};

pub use row::record_from_cells;

static GRID_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(RESULTS_GRID_SELECTOR)
        .expect("BUG: hardcoded results grid selector is statically valid")
});

static INDEXED_ROW_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("tr[data-ri]").expect("BUG: hardcoded selector 'tr[data-ri]' is statically valid")
});

static CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("td").expect("BUG: hardcoded selector 'td' is statically valid")
});

/// What to do with a row that does not have the 8 + 3k cell shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Fail the whole parse
    #[default]
    FailFast,
    /// Log a warning and drop the row
    SkipMalformed,
}

/// Extract all company records, failing on the first malformed row
pub fn parse_results(html: &str) -> RegisterResult<SearchResultSet> {
    parse_results_with(html, RowPolicy::FailFast)
}

/// Extract all company records with an explicit malformed-row policy
///
/// Records come back in row-index order, even when the rows appear in a
/// different order in the document.
pub fn parse_results_with(html: &str, policy: RowPolicy) -> RegisterResult<SearchResultSet> {
    let document = Html::parse_document(html);

    let mut grids = document.select(&GRID_SELECTOR);
    let grid = grids
        .next()
        .ok_or_else(|| RegisterError::Structure("no results grid".to_string()))?;
    let extra_grids = grids.count();
    if extra_grids > 0 {
        debug!("Page has {} additional grid tables, using the first", extra_grids);
    }

    let mut indexed = Vec::new();
    for row in grid.select(&INDEXED_ROW_SELECTOR) {
        if !belongs_to_grid(row, grid) {
            continue;
        }

        let label = row.value().attr(ROW_INDEX_ATTR).unwrap_or_default();
        match parse_row(row, label) {
            Ok(entry) => indexed.push(entry),
            Err(e @ RegisterError::MalformedRow { .. }) if policy == RowPolicy::SkipMalformed => {
                warn!("Skipping result row: {}", e);
            }
            Err(e) => return Err(e),
        }
    }

    // Stable: rows sharing an index keep document order
    indexed.sort_by_key(|(index, _)| *index);

    debug!("Extracted {} company records", indexed.len());
    Ok(SearchResultSet::new(
        indexed.into_iter().map(|(_, record)| record).collect(),
    ))
}

fn parse_row(
    row: ElementRef<'_>,
    label: &str,
) -> RegisterResult<(i64, crate::model::CompanyRecord)> {
    let cells: Vec<String> = row
        .select(&CELL_SELECTOR)
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .collect();

    let index = label.trim().parse::<i64>().map_err(|_| {
        RegisterError::malformed_row(label, cells.len(), "row index is not an integer")
    })?;

    let record = record_from_cells(label, &cells)?;
    Ok((index, record))
}

/// Rows of tables nested inside the grid's cells are not result rows
fn belongs_to_grid(row: ElementRef<'_>, grid: ElementRef<'_>) -> bool {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "table")
        .is_some_and(|table| table.id() == grid.id())
}
