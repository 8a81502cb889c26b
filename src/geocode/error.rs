use std::fmt::Formatter;

use reqwest::StatusCode;

/// Why an address could not be turned into coordinates. Every variant is
/// recoverable at the row level.
#[derive(Debug)]
pub enum ResolutionError {
    NoMatch { address: String },
    LowRelevance { address: String, relevance: f64 },
    InvalidUrl { address: String },
    Transport { address: String, source: reqwest::Error },
    Status { address: String, status: StatusCode },
    InvalidResponse { address: String, source: serde_json::Error },
}

impl std::fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ResolutionError::NoMatch { address } => {
                write!(f, "Could not geocode address: {}", address)
            }
            ResolutionError::LowRelevance { address, relevance } => write!(
                f,
                "Best match for {} is not relevant enough ({})",
                address, relevance
            ),
            ResolutionError::InvalidUrl { address } => {
                write!(f, "Cannot build a lookup url for {}", address)
            }
            ResolutionError::Transport { address, source } => {
                write!(f, "Request for {} failed: {}", address, source)
            }
            ResolutionError::Status { address, status } => {
                write!(f, "Geocoding {} returned {}", address, status)
            }
            ResolutionError::InvalidResponse { address, source } => {
                write!(f, "Unreadable response for {}: {}", address, source)
            }
        }
    }
}

impl std::error::Error for ResolutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolutionError::Transport { source, .. } => Some(source),
            ResolutionError::InvalidResponse { source, .. } => Some(source),
            _ => None,
        }
    }
}
