//! Convert grayscale rasters into sparse images
//!
//! Dark pixels are "on", matching the scan convention that `true = black`

use image::GrayImage;

use crate::models::{Point, SparseImage};

/// Mark every pixel with luma below `cutoff` as on
pub fn from_luma(image: &GrayImage, cutoff: u8) -> SparseImage {
    SparseImage::from_points(
        image
            .enumerate_pixels()
            .filter(|(_, _, luma)| luma.0[0] < cutoff)
            .map(|(x, y, _)| Point::new(x, y)),
    )
}

/// Threshold with a cutoff chosen by Otsu's method
pub fn from_luma_otsu(image: &GrayImage) -> SparseImage {
    from_luma(image, otsu_cutoff(image.as_raw()))
}

/// Otsu's optimal cutoff for 8-bit luma samples
pub fn otsu_cutoff(gray: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total = gray.len() as f64;
    let weighted_total: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &count)| i as f64 * count as f64)
        .sum();

    let mut below_count = 0u64;
    let mut below_sum = 0.0f64;
    let mut best_variance = 0.0f64;
    let mut best_cutoff = 128u8;

    // Pixels strictly below `cutoff` form the dark class.
    for cutoff in 1..=255usize {
        below_count += histogram[cutoff - 1];
        below_sum += (cutoff - 1) as f64 * histogram[cutoff - 1] as f64;
        let above_count = gray.len() as u64 - below_count;
        if below_count == 0 || above_count == 0 {
            continue;
        }

        let below_mean = below_sum / below_count as f64;
        let above_mean = (weighted_total - below_sum) / above_count as f64;
        let w_below = below_count as f64 / total;
        let w_above = above_count as f64 / total;
        let variance = w_below * w_above * (below_mean - above_mean).powi(2);

        if variance > best_variance {
            best_variance = variance;
            best_cutoff = cutoff as u8;
        }
    }

    best_cutoff
}
