//! Pattern-coverage similarity between a placed pattern and the scan
//!
//! The ratio only counts how many of the pattern's own pixels are lit in the
//! scan. Scan pixels outside the pattern footprint are ignored, so a dense
//! scan satisfies any threshold for any pattern. This is a known limitation
//! of the metric and is kept as-is.

use crate::models::SparseImage;
use crate::models::sparse_image::PositionedView;

/// Something with on-pixels that can be checked against a scan index
pub trait Footprint {
    /// Total on-pixels in the footprint
    fn pixel_count(&self) -> usize;

    /// How many of those pixels are on in `scan`
    fn covered_by(&self, scan: &SparseImage) -> usize;
}

impl Footprint for SparseImage {
    fn pixel_count(&self) -> usize {
        self.len()
    }

    fn covered_by(&self, scan: &SparseImage) -> usize {
        self.pixels()
            .iter()
            .filter(|p| scan.index_contains(p.key()))
            .count()
    }
}

impl Footprint for PositionedView<'_> {
    fn pixel_count(&self) -> usize {
        self.len()
    }

    fn covered_by(&self, scan: &SparseImage) -> usize {
        self.positions()
            .flatten()
            .filter(|p| scan.index_contains(p.key()))
            .count()
    }
}

/// Fraction of `pattern`'s on-pixels that are also on in `scan`.
///
/// Returns a value in `[0, 1]`. A pattern with no on-pixels scores `0.0`.
pub fn match_ratio<F: Footprint + ?Sized>(scan: &SparseImage, pattern: &F) -> f64 {
    let total = pattern.pixel_count();
    if total == 0 {
        return 0.0;
    }
    pattern.covered_by(scan) as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subset_scores_one() {
        let scan = SparseImage::build("+++\n+++");
        let pattern = SparseImage::build("+ +\n +");
        assert_eq!(match_ratio(&scan, &pattern), 1.0);
    }

    #[test]
    fn test_disjoint_scores_zero() {
        let scan = SparseImage::build("+ \n +");
        let pattern = SparseImage::build(" +\n+ ");
        assert_eq!(match_ratio(&scan, &pattern), 0.0);
    }

    #[test]
    fn test_partial_coverage() {
        let scan = SparseImage::build("++  ");
        let pattern = SparseImage::build("++++");
        assert_eq!(match_ratio(&scan, &pattern), 0.5);
    }

    #[test]
    fn test_empty_pattern_scores_zero() {
        let scan = SparseImage::build("+++");
        let pattern = SparseImage::build("   ");
        assert_eq!(match_ratio(&scan, &pattern), 0.0);
    }

    #[test]
    fn test_metric_ignores_extra_scan_pixels() {
        // A fully lit scan covers any pattern completely.
        let scan = SparseImage::build("+++++\n+++++\n+++++");
        let pattern = SparseImage::build("+\n +\n  +");
        assert_eq!(match_ratio(&scan, &pattern), 1.0);
        // The reverse direction is penalized.
        assert!(match_ratio(&pattern, &scan) < 0.25);
    }

    #[test]
    fn test_view_and_translated_image_agree() {
        let scan = SparseImage::build("  ++\n  + \n+   ");
        let pattern = SparseImage::build("++\n+ ");
        for (x, y) in [(0, 0), (1, 0), (2, 0), (0, 1), (3, 2)] {
            let mut moved = pattern.clone();
            moved.translate_to(x, y).unwrap();
            let view = pattern.positioned(x, y);
            assert_eq!(match_ratio(&scan, &moved), match_ratio(&scan, &view));
        }
        assert_eq!(match_ratio(&scan, &pattern.positioned(2, 0)), 1.0);
    }

    #[test]
    fn test_ratio_stays_in_unit_interval() {
        let scan = SparseImage::build("+ + +\n + + \n+ + +");
        let pattern = SparseImage::build("++\n++");
        for y in 0..4 {
            for x in 0..6 {
                let r = match_ratio(&scan, &pattern.positioned(x, y));
                assert!((0.0..=1.0).contains(&r), "ratio {r} at ({x}, {y})");
            }
        }
    }
}
