//! Bliffoscope - exhaustive sparse pattern search
//!
//! Finds every placement of one or more small binary patterns inside a large,
//! noisy binary scan. Patterns are tried at every anchor of the scan and a
//! placement is reported when enough of the pattern's on-pixels are lit in
//! the scan at that position.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Search configuration and environment overrides
pub mod config;
/// Env-gated stderr logging
pub mod debug;
/// Similarity metric and the exhaustive search engine
pub mod detector;
/// Error types
pub mod error;
/// Core data structures (SparseImage, Target, MatchRecord, Point)
pub mod models;
/// Loading, samples, and report rendering
pub mod tools;
/// Color sources and raster conversion
pub mod utils;

pub use config::{DEFAULT_THRESHOLD, SearchConfig};
pub use detector::search::{CancelToken, SearchEngine, SearchOutcome};
pub use detector::similarity::{Footprint, match_ratio};
pub use error::{DecodeError, Error, Result};
pub use models::{Color, MatchRecord, Point, PositionedView, SparseImage, Target, TargetCatalog};

/// Search `scan` for every target in `catalog` at the given threshold
///
/// # Arguments
/// * `scan` - Image to search in
/// * `catalog` - Targets, tried in insertion order at each anchor
/// * `threshold` - Minimum match ratio in `[0, 1]`
///
/// # Returns
/// Matches in row, column, target order with random display colors
///
/// # Example
/// ```
/// use bliffoscope::{SparseImage, Target, TargetCatalog, find_targets};
///
/// let scan = SparseImage::build("+ +");
/// let mut catalog = TargetCatalog::new();
/// catalog.add(Target::new("dot", "+").unwrap());
///
/// let outcome = find_targets(&scan, &catalog, 0.65).unwrap();
/// assert_eq!(outcome.len(), 2);
/// ```
pub fn find_targets<'a>(
    scan: &SparseImage,
    catalog: &'a TargetCatalog,
    threshold: f64,
) -> Result<SearchOutcome<'a>> {
    let config = SearchConfig::default().with_threshold(threshold);
    let mut engine = SearchEngine::new(config)?;
    Ok(engine.find_targets(scan, catalog))
}
