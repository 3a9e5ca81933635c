//! Pattern detection over a sparse scan
//!
//! This module contains the matching logic:
//! - Similarity metric (pattern coverage ratio)
//! - Exhaustive translation search with optional row parallelism

/// Exhaustive search over every anchor of the scan
pub mod search;
/// Pattern coverage ratio against a scan index
pub mod similarity;
