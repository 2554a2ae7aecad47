//! Error types for flowpath

use thiserror::Error;

/// Main error type for flowpath operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Cannot load flow direction raster {path}: {reason}")]
    RasterLoad { path: String, reason: String },

    #[error("Invalid algorithm index: {0} (expected 1-7)")]
    InvalidAlgorithmIndex(i64),

    #[error("Invalid algorithm parameter: {value} ({reason})")]
    InvalidParameter { value: i64, reason: &'static str },

    #[error("Outlet (row {row}, column {col}) lies outside the {rows}x{cols} grid (one-based)")]
    OutletOutOfBounds {
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },

    #[error("No outlet locations were parsed from the outlet file")]
    EmptyOutletSet,

    #[error("Algorithm '{0}' does not support multiple outlets")]
    UnsupportedMultiOutlet(&'static str),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for flowpath operations
pub type Result<T> = std::result::Result<T, Error>;
