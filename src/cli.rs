use std::path::PathBuf;

use clap::Parser;

use crate::data::import::{ImportOptions, DEFAULT_CITY};
use crate::data::source::SourceFormat;

/// Geocode shelter records from a spreadsheet and load them into PostgreSQL.
///
/// DATABASE_URL and GEOCODING_API_KEY are read from the environment or from
/// a .env file.
#[derive(Debug, Parser)]
#[command(name = "shelter-import", version)]
pub struct Cli {
    /// Spreadsheet to import. The first row is a header and is skipped.
    #[arg(default_value = "shelters.xlsx")]
    pub input: PathBuf,

    /// City appended to every address before geocoding
    #[arg(long, default_value = DEFAULT_CITY)]
    pub city: String,

    #[arg(long, value_enum, default_value_t = SourceFormat::Auto)]
    pub format: SourceFormat,

    /// Bind columns by header title (district, address, ...) instead of position
    #[arg(long)]
    pub match_header: bool,

    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            city: self.city.clone(),
            match_header: self.match_header,
            show_progress: !self.no_progress,
        }
    }
}
