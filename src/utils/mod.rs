//! Utility functions around the matching core
//!
//! - Color sources for match records (random or fixed palette)
//! - Raster thresholding (grayscale image to sparse image)

pub mod color;
pub mod raster;
