use super::browser::{BrowserSession, DomElement};
use super::config;
use super::models::OptionRow;
use super::row_parser::parse_row;
use crate::error::{Result, ScrapeError};
use tracing::{debug, warn};

/// Read every strike row of the option chain table, in document order.
///
/// The whole cycle is abandoned on the first empty or malformed row group so
/// that callers never see a partial table.
pub async fn extract_rows<B: BrowserSession>(session: &B) -> Result<Vec<OptionRow>> {
    let table = session
        .find(config::TABLE_BODY_XPATH)
        .await?
        .ok_or(ScrapeError::TableNotFound)?;

    let row_groups = table.find_all(config::ROW_GROUP_XPATH).await?;
    if row_groups.is_empty() {
        warn!("Option chain table has no row groups");
        return Err(ScrapeError::EmptyTable);
    }

    let mut rows = Vec::with_capacity(row_groups.len());
    for (idx, group) in row_groups.iter().enumerate() {
        let group_number = idx + 1;
        let cells = read_cells(group, group_number).await?;

        if cells.is_empty() {
            warn!(row_group = group_number, "No values found!");
            return Err(ScrapeError::EmptyRow {
                row_group: group_number,
            });
        }

        rows.push(parse_row(group_number, &cells)?);
    }

    debug!(rows = rows.len(), "Extracted option chain rows");
    Ok(rows)
}

/// Cell texts of the stripe row inside one row group; empty when the stripe
/// row is absent
async fn read_cells<E: DomElement>(group: &E, group_number: usize) -> Result<Vec<String>> {
    let Some(row) = group.find(config::row_xpath_for_group(group_number)).await? else {
        return Ok(Vec::new());
    };

    let columns = row.find_all(config::CELL_XPATH).await?;
    let mut cells = Vec::with_capacity(columns.len());
    for col in &columns {
        cells.push(col.text().await?);
    }
    Ok(cells)
}
