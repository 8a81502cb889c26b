use std::fmt::Formatter;

use indicatif::ProgressBar;
use log::{info, warn};

use crate::data::import::error::ImportError;
use crate::data::models::ShelterDraft;
use crate::data::repo::shelters::{ShelterSink, ShelterStore};
use crate::data::source::{ColumnMapping, Field, RawRow, Rows};
use crate::geocode::error::ResolutionError;
use crate::geocode::AddressResolver;

pub mod error;

/// City appended to every address before it is geocoded.
pub const DEFAULT_CITY: &str = "Київ";

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub city: String,
    /// Bind columns by header title instead of by position.
    pub match_header: bool,
    pub show_progress: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            city: DEFAULT_CITY.to_owned(),
            match_header: false,
            show_progress: false,
        }
    }
}

#[derive(Debug)]
pub enum SkipReason {
    MissingField(Field),
    Unresolved(ResolutionError),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            SkipReason::MissingField(field) => write!(f, "missing {}", field.header_name()),
            SkipReason::Unresolved(err) => write!(f, "{}", err),
        }
    }
}

#[derive(Debug)]
pub struct SkippedRow {
    pub row: usize,
    pub address: Option<String>,
    pub reason: SkipReason,
}

#[derive(Debug, Default)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: Vec<SkippedRow>,
}

impl ImportSummary {
    pub fn total_rows(&self) -> usize {
        self.inserted + self.skipped.len()
    }
}

impl std::fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} inserted, {} skipped, {} rows read",
            self.inserted,
            self.skipped.len(),
            self.total_rows()
        )
    }
}

enum RowOutcome {
    Inserted,
    Skipped(SkippedRow),
}

/// Geocodes every data row and inserts the located shelters in a single
/// transaction.
///
/// Rows that cannot be geocoded, or that have no district or address, are
/// logged and skipped. Any other error, a row with fewer cells than the
/// mapped columns included, stops the run and nothing is committed. Rows are always appended: running twice on the same file
/// inserts every shelter twice.
pub fn run<S, R>(
    rows: Rows,
    store: &mut S,
    resolver: &R,
    options: &ImportOptions,
) -> Result<ImportSummary, ImportError>
where
    S: ShelterStore,
    R: AddressResolver + ?Sized,
{
    let mapping = match (options.match_header, rows.header()) {
        (true, Some(header)) => ColumnMapping::from_header(header)?,
        _ => ColumnMapping::positional(),
    };
    let progress = progress_bar(options.show_progress, rows.remaining());

    let result = store.in_transaction(|sink| {
        let mut summary = ImportSummary::default();
        for row in rows {
            let row = row?;
            match stage_row(&row, &mapping, resolver, &options.city, sink)? {
                RowOutcome::Inserted => summary.inserted += 1,
                RowOutcome::Skipped(skipped) => {
                    warn!(
                        "Skipping row {} ({}): {}",
                        skipped.row,
                        skipped.address.as_deref().unwrap_or("no address"),
                        skipped.reason
                    );
                    summary.skipped.push(skipped);
                }
            }
            progress.inc(1);
        }
        Ok(summary)
    });
    progress.finish_and_clear();

    let summary = result?;
    info!("Data successfully inserted into the database: {}", summary);
    Ok(summary)
}

fn stage_row<R>(
    row: &RawRow,
    mapping: &ColumnMapping,
    resolver: &R,
    city: &str,
    sink: &mut dyn ShelterSink,
) -> Result<RowOutcome, ImportError>
where
    R: AddressResolver + ?Sized,
{
    mapping.check_shape(row)?;

    let draft = match ShelterDraft::from_row(row, mapping) {
        Ok(draft) => draft,
        Err(field) => {
            return Ok(RowOutcome::Skipped(SkippedRow {
                row: row.number,
                address: mapping.get(row, Field::Address).map(str::to_owned),
                reason: SkipReason::MissingField(field),
            }))
        }
    };

    match resolver.resolve(&draft.lookup_address(city)) {
        Ok(coordinates) => {
            sink.insert_shelter(&draft.locate(coordinates))?;
            Ok(RowOutcome::Inserted)
        }
        Err(err) => Ok(RowOutcome::Skipped(SkippedRow {
            row: row.number,
            address: Some(draft.address),
            reason: SkipReason::Unresolved(err),
        })),
    }
}

fn progress_bar(visible: bool, length: Option<usize>) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    match length {
        Some(length) => ProgressBar::new(length as u64),
        None => ProgressBar::new_spinner(),
    }
}
