//! Extraction error types for ces-extract.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// No accepted archive shape produced a document array.
    #[error("Malformed archive: {0}")]
    MalformedArchive(String),

    #[error("Invalid archive JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Failed to read archive {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One archive entry could not be read as a campaign document.
    #[error("Document {index} is not a valid campaign document: {source}")]
    InvalidDocument {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A lexicon term could not be compiled into a matcher.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
