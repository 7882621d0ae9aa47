use super::config::{COLUMN_COUNT, PLACEHOLDER_CELL, PLACEHOLDER_PERCENT};
use super::models::OptionRow;
use crate::error::{Result, ScrapeError};
use tracing::debug;

/// Map one row's cell texts onto an [`OptionRow`].
///
/// Cells are positional: `calls_oi_change, calls_oi, calls_ltp, strike, iv,
/// puts_ltp, puts_oi, puts_oi_change`. A `-` in either OI change column
/// becomes `0%`; everything else is kept verbatim.
pub fn parse_row<S: AsRef<str>>(row_group: usize, cells: &[S]) -> Result<OptionRow> {
    if cells.len() < COLUMN_COUNT {
        return Err(ScrapeError::MalformedRow {
            row_group,
            cells: cells.len(),
        });
    }
    if cells.len() > COLUMN_COUNT {
        debug!(
            row_group,
            extra = cells.len() - COLUMN_COUNT,
            "Ignoring trailing cells"
        );
    }

    let cell = |idx: usize| cells[idx].as_ref().to_string();

    Ok(OptionRow {
        calls_oi_change: normalize_oi_change(cells[0].as_ref()),
        calls_oi: cell(1),
        calls_ltp: cell(2),
        strike: cell(3),
        iv: cell(4),
        puts_ltp: cell(5),
        puts_oi: cell(6),
        puts_oi_change: normalize_oi_change(cells[7].as_ref()),
    })
}

fn normalize_oi_change(text: &str) -> String {
    if text == PLACEHOLDER_CELL {
        PLACEHOLDER_PERCENT.to_string()
    } else {
        text.to_string()
    }
}
