//! Error types for decoding, catalog construction, and search setup

use thiserror::Error;

/// Failure to turn raw input into a [`SparseImage`](crate::SparseImage)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Raw bytes were not valid UTF-8
    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Content was required but the input has no rows
    #[error("input contains no rows")]
    NoRows,
    /// At least one on-pixel was required but none were found
    #[error("input contains no '{marker}' pixels")]
    NoOnPixels {
        /// Marker character that denotes an on-pixel
        marker: char,
    },
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum Error {
    /// Input could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// Target pattern has no on-pixels, so its match ratio is undefined
    #[error("target '{name}' has no on-pixels")]
    DegenerateTarget {
        /// Target label
        name: String,
    },
    /// Threshold is NaN or outside `[0, 1]`
    #[error("threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),
    /// Translation would push a pixel past the addressable grid
    #[error("translation to ({x}, {y}) overflows the grid")]
    TranslationOverflow {
        /// Requested anchor column
        x: u32,
        /// Requested anchor row
        y: u32,
    },
    /// Malformed `NAME=PATH` target argument
    #[error("invalid target spec '{0}', expected NAME=PATH")]
    InvalidTargetSpec(String),
    /// Canvas rendering needs an output path
    #[error("canvas rendering requires an output path")]
    MissingOutput,
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Raster load/save error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
