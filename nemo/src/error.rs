//! Error types used by the crate.

use nemo_types::error::NemoTypesError;
use thiserror::Error;

/// Nemo error type.
#[derive(Debug, Error)]
pub enum NemoError {
    /// A record of an input file is malformed.
    #[error("invalid input record at line {line}: {message}")]
    InputFormat {
        /// Line number of the record, counting the header as line 1.
        line: u64,
        /// What is wrong with the record.
        message: String,
    },
    /// Points given to the Voronoi construction do not span the sphere.
    #[error("degenerate geometry: {0}")]
    Geometry(String),
    /// Remote point search was called with no candidates.
    #[error("no candidate points to search")]
    NoCandidates,
    /// Remote point search was called with no targets.
    #[error("no target points to measure distance to")]
    NoTargets,
    /// Invalid finder options.
    #[error("invalid options: {0}")]
    Config(String),
    /// Reference ellipsoid could not be set up.
    #[error("ellipsoid error: {0}")]
    Ellipsoid(String),
    /// Invalid coordinate value.
    #[error(transparent)]
    Types(#[from] NemoTypesError),
    /// Error reading CSV data.
    #[error("failed to read csv data")]
    Csv(#[from] csv::Error),
    /// Error serializing output.
    #[error("failed to serialize output")]
    Json(#[from] serde_json::Error),
    /// Error reading/writing data to the FS.
    #[error("failed to access file")]
    FsIo(#[from] std::io::Error),
}

/// Result type of the crate.
pub type Result<T> = std::result::Result<T, NemoError>;

impl From<crate::hull::HullError> for NemoError {
    fn from(value: crate::hull::HullError) -> Self {
        Self::Geometry(value.to_string())
    }
}
