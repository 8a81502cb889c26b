use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ExtractError {
    Io(std::io::Error),
    Csv(csv::Error),
    Workbook(calamine::Error),
    EmptyWorkbook,
    UnknownFormat(PathBuf),
    MissingHeaderColumn(&'static str),
    ShortRow { row: usize, cells: usize, expected: usize },
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ExtractError::Io(inner) => write!(f, "IO: {}", inner),
            ExtractError::Csv(inner) => write!(f, "Invalid csv data: {}", inner),
            ExtractError::Workbook(inner) => write!(f, "Invalid workbook: {}", inner),
            ExtractError::EmptyWorkbook => write!(f, "Workbook has no worksheet"),
            ExtractError::UnknownFormat(path) => write!(
                f,
                "Cannot tell the format of {} from its extension",
                path.display()
            ),
            ExtractError::MissingHeaderColumn(name) => {
                write!(f, "Header has no '{}' column", name)
            }
            ExtractError::ShortRow { row, cells, expected } => write!(
                f,
                "Row {} has {} cells, at least {} expected",
                row, cells, expected
            ),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::Io(inner) => Some(inner),
            ExtractError::Csv(inner) => Some(inner),
            ExtractError::Workbook(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExtractError {
    fn from(error: std::io::Error) -> Self {
        ExtractError::Io(error)
    }
}

impl From<csv::Error> for ExtractError {
    fn from(error: csv::Error) -> Self {
        ExtractError::Csv(error)
    }
}

impl From<calamine::Error> for ExtractError {
    fn from(error: calamine::Error) -> Self {
        ExtractError::Workbook(error)
    }
}
