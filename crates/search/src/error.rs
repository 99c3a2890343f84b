//! Error types for the search crate.
//!
//! Matching itself never fails; these only come out of building or loading
//! a catalog.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while building or loading a catalog.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Two entries share an id
    #[error("Duplicate entry id: {0}")]
    DuplicateId(String),

    /// Popularity outside 0..=100
    #[error("Entry {id}: popularity {popularity} is outside 0..=100")]
    PopularityOutOfRange {
        /// Offending entry
        id: String,
        /// Value found
        popularity: u8,
    },

    /// Entry missing a required field
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    /// Unknown entry kind
    #[error("Unknown entry kind: {0} (expected event, city, theme or venue)")]
    UnknownKind(String),

    /// Catalog text could not be decoded
    #[error("Failed to parse {format} catalog: {message}")]
    Parse {
        /// `json` or `toml`
        format: &'static str,
        /// Decoder message
        message: String,
    },

    /// Catalog file extension is neither `.json` nor `.toml`
    #[error("Unsupported catalog format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Catalog file could not be read
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            format: "json",
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SearchError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse {
            format: "toml",
            message: err.to_string(),
        }
    }
}
