use std::fmt::Formatter;

use crate::config::ConfigError;
use crate::data::import::error::ImportError;
use crate::data::source::error::ExtractError;

/// Everything that makes the command exit with a failure.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    HttpClient(reqwest::Error),
    Connection(diesel::ConnectionError),
    Import(ImportError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            AppError::Config(inner) => write!(f, "Configuration error: {}", inner),
            AppError::HttpClient(inner) => write!(f, "Could not create http client: {}", inner),
            AppError::Connection(inner) => write!(f, "Could not connect to database: {}", inner),
            AppError::Import(inner) => write!(f, "Error processing data: {}", inner),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        AppError::Config(error)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        AppError::HttpClient(error)
    }
}

impl From<diesel::ConnectionError> for AppError {
    fn from(error: diesel::ConnectionError) -> Self {
        AppError::Connection(error)
    }
}

impl From<ImportError> for AppError {
    fn from(error: ImportError) -> Self {
        AppError::Import(error)
    }
}

impl From<ExtractError> for AppError {
    fn from(error: ExtractError) -> Self {
        AppError::Import(ImportError::Extract(error))
    }
}
