//! Error taxonomy for the indexing pipeline.
//!
//! `DirectoryNotFound`, `Timestamp` and `Serialization` are fatal to a run.
//! `FileRead` is raised per document and recovered by the builder.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Error, Debug)]
pub enum IndexError {
    /// Corpus root is missing or cannot be listed.
    #[error("corpus directory not found or unreadable: {path}: {source}")]
    DirectoryNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single document could not be read or decoded.
    #[error("cannot read {path}: {reason}")]
    FileRead { path: PathBuf, reason: String },

    /// The output artifact could not be written.
    #[error("cannot write index to {path}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The build timestamp could not be rendered as RFC 3339.
    #[error("cannot format build timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    /// An existing artifact is not a valid index document.
    #[error("malformed index at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
