use std::iter;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::data::source::error::ExtractError;
use crate::data::source::{non_empty, RawRow, Rows};

/// Reads the first worksheet of a workbook.
pub fn read_workbook(path: &Path) -> Result<Rows, ExtractError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ExtractError::EmptyWorkbook)??;

    // The range starts at the first used cell; pad it back to A1 so the
    // header is always sheet row 1.
    let (first_row, first_column) = range
        .start()
        .map(|(row, column)| (row as usize, column as usize))
        .unwrap_or((0, 0));
    let width = first_column + range.width();

    let blank_rows = (0..first_row).map(|_| vec![None; width]);
    let used_rows = range.rows().map(|cells| {
        iter::repeat(None)
            .take(first_column)
            .chain(cells.iter().map(cell_text))
            .collect::<Vec<_>>()
    });
    let rows: Vec<RawRow> = blank_rows
        .chain(used_rows)
        .enumerate()
        .map(|(index, cells)| RawRow::new(index + 1, cells))
        .collect();

    let total = rows.len();
    Rows::new(rows.into_iter().map(Ok), Some(total))
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(text) => non_empty(text),
        other => Some(other.to_string()),
    }
}
