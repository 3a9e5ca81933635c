//! Built-in demo scan and the two classic targets

use crate::error::Result;
use crate::models::{SparseImage, Target, TargetCatalog};

/// "Slime Torpedo" pattern
pub const SLIME_TORPEDO: &str = include_str!("../../data/slime_torpedo.txt");
/// "Star Ship" pattern
pub const STAR_SHIP: &str = include_str!("../../data/star_ship.txt");
/// 100x100 noisy demo scan
pub const DEMO_SCAN: &str = include_str!("../../data/demo_scan.txt");

/// Decoded demo scan
pub fn scan() -> SparseImage {
    SparseImage::build(DEMO_SCAN)
}

/// Catalog with Slime Torpedo followed by Star Ship
pub fn catalog() -> Result<TargetCatalog> {
    Ok([
        Target::new("Slime Torpedo", SLIME_TORPEDO)?,
        Target::new("Star Ship", STAR_SHIP)?,
    ]
    .into_iter()
    .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_decode() {
        let scan = scan();
        assert_eq!(scan.size(), (99, 99));
        assert_eq!(scan.len(), 2127);

        let catalog = catalog().unwrap();
        let sizes: Vec<usize> = catalog.all().iter().map(|t| t.pattern().len()).collect();
        assert_eq!(sizes, vec![47, 54]);
    }
}
