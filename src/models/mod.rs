/// Match records and their display colors
pub mod match_record;
/// Grid coordinates and index keys
pub mod point;
/// Sparse on-pixel image with membership index
pub mod sparse_image;
/// Named targets and the ordered catalog
pub mod target;

pub use match_record::{Color, MatchRecord};
pub use point::{PixelKey, Point};
pub use sparse_image::{ON_PIXEL, PositionedView, SparseImage};
pub use target::{Target, TargetCatalog};
