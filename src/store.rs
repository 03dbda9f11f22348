//! Shared sheet I/O and application state
//!
//! Both stores persist their data as a single CSV sheet on local disk and
//! follow the same discipline: load the entire file, mutate the rows in
//! memory, rewrite the entire file. There is no locking and no transaction
//! boundary; overlapping writers can lose an update, which is an accepted
//! limitation of the whole-file-rewrite design.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::AppError;
use crate::menu::MenuStore;
use crate::orders::OrderStore;

/// Application state shared across all request handlers
///
/// Each store carries its own file path so tests can point the same code at
/// isolated temporary files. Both handles are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub orders: OrderStore,
    pub menu: MenuStore,
}

/// Reads every row of a sheet, or `None` when the file does not exist yet
///
/// Rows are read without header interpretation and with ragged lengths
/// allowed, since the menu sheet's meta row is shorter than its item rows.
pub(crate) fn read_sheet(path: &Path) -> Result<Option<Vec<StringRecord>>, AppError> {
    if !path.exists() {
        return Ok(None);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?);
    }
    Ok(Some(rows))
}

/// Rewrites a sheet in full, creating the file on first write
pub(crate) fn write_sheet<R, F>(path: &Path, rows: R) -> Result<(), AppError>
where
    R: IntoIterator<Item = F>,
    F: IntoIterator<Item = String>,
{
    let mut writer = WriterBuilder::new().flexible(true).from_path(path)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// True when a row has at least one non-blank cell
pub(crate) fn is_populated(record: &StringRecord) -> bool {
    record.iter().any(|cell| !cell.trim().is_empty())
}
