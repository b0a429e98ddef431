//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error, PartialEq)]
pub enum NemoTypesError {
    /// Coordinate value is outside of its valid range.
    #[error("{name} {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the coordinate (`latitude` or `longitude`).
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Lower bound of the range.
        min: f64,
        /// Upper bound of the range.
        max: f64,
    },
    /// Coordinate value is NaN or infinite.
    #[error("{0} is not a finite number")]
    NotFinite(&'static str),
}
