use std::fmt::Formatter;

use crate::data::source::error::ExtractError;

/// Errors that abort a run. Any of them rolls back every staged insert.
#[derive(Debug)]
pub enum ImportError {
    Extract(ExtractError),
    Persistence(diesel::result::Error),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ImportError::Extract(inner) => write!(f, "Error reading rows: {}", inner),
            ImportError::Persistence(inner) => write!(f, "Database error: {}", inner),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Extract(inner) => Some(inner),
            ImportError::Persistence(inner) => Some(inner),
        }
    }
}

impl From<ExtractError> for ImportError {
    fn from(error: ExtractError) -> Self {
        ImportError::Extract(error)
    }
}

impl From<diesel::result::Error> for ImportError {
    fn from(error: diesel::result::Error) -> Self {
        ImportError::Persistence(error)
    }
}
