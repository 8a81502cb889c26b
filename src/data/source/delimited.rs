use std::io::Read;

use crate::data::source::error::ExtractError;
use crate::data::source::{non_empty, RawRow, Rows};

/// Reads comma separated rows. Row length is not checked here, the import
/// rejects rows too short for its column mapping.
pub fn read_csv<R: Read + 'static>(reader: R) -> Result<Rows, ExtractError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let rows = reader
        .into_records()
        .enumerate()
        .map(|(index, record)| -> Result<RawRow, ExtractError> {
            let record = record?;
            Ok(RawRow::new(index + 1, record.iter().map(non_empty).collect()))
        });

    Rows::new(rows, None)
}
