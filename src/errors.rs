use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Failures of the planar geometry primitives. These never escape the hull extractor, which
/// treats them as degenerate input and falls back to returning the slice unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidGeometry {
    NotEnoughPoints,
    GeometricOpFailed,
}

impl Display for InvalidGeometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for InvalidGeometry {}

/// Errors raised by an imputator, either when it is configured or when it is handed a table
/// that violates its preconditions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImputeError {
    #[error("Invalid imputator configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid input table: {0}")]
    InvalidInput(String),
}

/// Errors raised when assembling a polar diagram slice from its component sequences.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SliceError {
    #[error("Slice sequences must have equal length (ws={ws}, wa={wa}, bsp={bsp})")]
    LengthMismatch { ws: usize, wa: usize, bsp: usize },

    #[error("Slice info has {info} entries but the slice has {points} points")]
    InfoLengthMismatch { info: usize, points: usize },
}
