use crate::error::{RegisterError, RegisterResult};
use crate::model::{CompanyRecord, HistoryEntry};
use crate::utils::{FIXED_COLUMNS, HISTORY_GROUP_SIZE};

/// Build a record from the trimmed cell texts of one result row
///
/// `row` only labels errors. Fails unless there are exactly
/// `FIXED_COLUMNS + HISTORY_GROUP_SIZE * k` cells.
pub fn record_from_cells(row: &str, cells: &[String]) -> RegisterResult<CompanyRecord> {
    if cells.len() < FIXED_COLUMNS {
        return Err(RegisterError::malformed_row(
            row,
            cells.len(),
            format!("expected at least {FIXED_COLUMNS} cells"),
        ));
    }

    let trailing = &cells[FIXED_COLUMNS..];
    if trailing.len() % HISTORY_GROUP_SIZE != 0 {
        return Err(RegisterError::malformed_row(
            row,
            cells.len(),
            format!(
                "{} history cells do not form complete groups of {HISTORY_GROUP_SIZE}",
                trailing.len()
            ),
        ));
    }

    let history = trailing
        .chunks_exact(HISTORY_GROUP_SIZE)
        .map(|group| HistoryEntry {
            name: group[0].clone(),
            location: group[1].clone(),
        })
        .collect();

    Ok(CompanyRecord {
        court: cells[1].clone(),
        name: cells[2].clone(),
        state: cells[3].clone(),
        status: cells[4].clone(),
        documents: cells[5].clone(),
        history,
    })
}
