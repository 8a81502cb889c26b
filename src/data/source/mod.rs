use std::fs::File;
use std::path::Path;

use clap::ValueEnum;

use crate::data::source::error::ExtractError;

pub mod delimited;
pub mod error;
pub mod workbook;

/// Named fields of a shelter row, in their default column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    District,
    Address,
    ShelterType,
    Place,
    BuildingType,
    Owner,
    Ownership,
    Phone,
    Accessibility,
    Hours,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::District,
        Field::Address,
        Field::ShelterType,
        Field::Place,
        Field::BuildingType,
        Field::Owner,
        Field::Ownership,
        Field::Phone,
        Field::Accessibility,
        Field::Hours,
    ];

    /// Header title used when binding columns by name.
    pub fn header_name(self) -> &'static str {
        match self {
            Field::District => "district",
            Field::Address => "address",
            Field::ShelterType => "shelter_type",
            Field::Place => "place",
            Field::BuildingType => "building_type",
            Field::Owner => "owner",
            Field::Ownership => "ownership",
            Field::Phone => "phone",
            Field::Accessibility => "accessibility",
            Field::Hours => "hours",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One spreadsheet row. `number` is 1-based and counts the header row.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub number: usize,
    cells: Vec<Option<String>>,
}

impl RawRow {
    pub fn new(number: usize, cells: Vec<Option<String>>) -> RawRow {
        RawRow { number, cells }
    }

    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).and_then(|cell| cell.as_deref())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }
}

/// Maps each field to the column it is read from. Columns not referenced
/// here are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: [usize; 10],
}

impl Default for ColumnMapping {
    fn default() -> Self {
        ColumnMapping::positional()
    }
}

impl ColumnMapping {
    pub fn positional() -> ColumnMapping {
        ColumnMapping { columns: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9] }
    }

    /// Binds every field to the header cell carrying its name. Titles are
    /// compared trimmed and case-insensitively.
    pub fn from_header(header: &RawRow) -> Result<ColumnMapping, ExtractError> {
        let mut columns = [0; 10];
        for field in Field::ALL.iter().copied() {
            let position = header
                .cells
                .iter()
                .position(|cell| {
                    cell.as_deref()
                        .map(|title| title.trim().eq_ignore_ascii_case(field.header_name()))
                        .unwrap_or(false)
                })
                .ok_or(ExtractError::MissingHeaderColumn(field.header_name()))?;
            columns[field.index()] = position;
        }
        Ok(ColumnMapping { columns })
    }

    pub fn column(&self, field: Field) -> usize {
        self.columns[field.index()]
    }

    pub fn get<'r>(&self, row: &'r RawRow, field: Field) -> Option<&'r str> {
        row.cell(self.column(field))
    }

    /// Number of cells a row needs to hold every mapped column.
    pub fn width(&self) -> usize {
        self.columns.iter().max().map_or(0, |column| column + 1)
    }

    /// Empty cells are fine, absent ones are not: a row too short for the
    /// mapping is malformed.
    pub fn check_shape(&self, row: &RawRow) -> Result<(), ExtractError> {
        let expected = self.width();
        if row.len() < expected {
            return Err(ExtractError::ShortRow {
                row: row.number,
                cells: row.len(),
                expected,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceFormat {
    /// Pick the reader from the file extension
    Auto,
    Csv,
    /// xlsx, xlsm, xlsb, xls or ods
    Workbook,
}

impl SourceFormat {
    pub fn resolve(self, path: &Path) -> Result<SourceFormat, ExtractError> {
        if self != SourceFormat::Auto {
            return Ok(self);
        }
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(SourceFormat::Csv),
            Some("xlsx") | Some("xlsm") | Some("xlsb") | Some("xls") | Some("ods") => {
                Ok(SourceFormat::Workbook)
            }
            _ => Err(ExtractError::UnknownFormat(path.to_path_buf())),
        }
    }
}

/// Data rows of a table, header already split off. Single pass.
pub struct Rows {
    header: Option<RawRow>,
    remaining: Option<usize>,
    inner: Box<dyn Iterator<Item = Result<RawRow, ExtractError>>>,
}

impl Rows {
    /// Takes the first row as header, without looking at its content.
    /// `total` is the number of rows including the header, when known.
    pub fn new<I>(rows: I, total: Option<usize>) -> Result<Rows, ExtractError>
    where
        I: Iterator<Item = Result<RawRow, ExtractError>> + 'static,
    {
        let mut inner: Box<dyn Iterator<Item = Result<RawRow, ExtractError>>> = Box::new(rows);
        let header = inner.next().transpose()?;

        Ok(Rows {
            header,
            remaining: total.map(|total| total.saturating_sub(1)),
            inner,
        })
    }

    pub fn header(&self) -> Option<&RawRow> {
        self.header.as_ref()
    }

    /// Number of data rows left, when the source knows it upfront.
    pub fn remaining(&self) -> Option<usize> {
        self.remaining
    }
}

impl Iterator for Rows {
    type Item = Result<RawRow, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.inner.next();
        if row.is_some() {
            self.remaining = self.remaining.map(|left| left.saturating_sub(1));
        }
        row
    }
}

pub fn open(path: &Path, format: SourceFormat) -> Result<Rows, ExtractError> {
    match format.resolve(path)? {
        SourceFormat::Csv => delimited::read_csv(File::open(path)?),
        _ => workbook::read_workbook(path),
    }
}

/// Empty text cells are treated the same as missing ones.
fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}
