//! Sparse binary image: on-pixel list plus an O(1) membership index
//!
//! The index is rebuilt on every translation so that it always mirrors the
//! pixel list. For read-only trials use [`SparseImage::positioned`], which
//! offsets coordinates arithmetically and never touches the stored state.

use std::collections::HashSet;

use super::{PixelKey, Point};
use crate::error::{DecodeError, Error, Result};

/// Character that marks an on-pixel in text grids
pub const ON_PIXEL: char = '+';

/// Set of on-pixels with a composite-key membership index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseImage {
    pixels: Vec<Point>,
    index: HashSet<PixelKey>,
    offset: Point,
}

impl SparseImage {
    /// Decode a line-delimited grid where `+` is on and anything else is off.
    ///
    /// Empty text is a valid 0x0 image. Rows may have different lengths.
    pub fn build(text: &str) -> Self {
        Self::build_with_marker(text, ON_PIXEL)
    }

    /// Decode a grid using a custom on-pixel marker
    pub fn build_with_marker(text: &str, marker: char) -> Self {
        let mut pixels = Vec::new();
        for (y, row) in text.split('\n').enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == marker {
                    pixels.push(Point::new(x as u32, y as u32));
                }
            }
        }
        Self::from_points(pixels)
    }

    /// Decode a grid that must contain at least one row and one on-pixel
    pub fn build_required(text: &str, marker: char) -> std::result::Result<Self, DecodeError> {
        if text.is_empty() {
            return Err(DecodeError::NoRows);
        }
        let image = Self::build_with_marker(text, marker);
        if image.is_empty() {
            return Err(DecodeError::NoOnPixels { marker });
        }
        Ok(image)
    }

    /// Decode raw bytes (e.g. file contents) with [`build_required`](Self::build_required)
    pub fn decode(bytes: &[u8], marker: char) -> std::result::Result<Self, DecodeError> {
        let text = std::str::from_utf8(bytes)?;
        Self::build_required(text, marker)
    }

    /// Build from explicit coordinates; duplicates are collapsed
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        let mut index = HashSet::new();
        let pixels: Vec<Point> = points.into_iter().filter(|p| index.insert(p.key())).collect();
        Self {
            pixels,
            index,
            offset: Point::default(),
        }
    }

    /// Maximum x and maximum y among on-pixels; `(0, 0)` for an empty image
    pub fn size(&self) -> (u32, u32) {
        self.pixels
            .iter()
            .fold((0, 0), |(w, h), p| (w.max(p.x), h.max(p.y)))
    }

    /// Number of on-pixels
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True when there are no on-pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Current on-pixels
    pub fn pixels(&self) -> &[Point] {
        &self.pixels
    }

    /// Cumulative translation applied since decoding
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// O(1) membership check against the index
    pub fn index_contains(&self, key: PixelKey) -> bool {
        self.index.contains(&key)
    }

    /// Convenience wrapper over [`index_contains`](Self::index_contains)
    pub fn contains(&self, point: Point) -> bool {
        self.index_contains(point.key())
    }

    /// Move the decoded pixels so that they sit at anchor `(x, y)`.
    ///
    /// Translation is absolute: calling twice with the same anchor is a no-op
    /// and `(0, 0)` restores the decoded layout. On overflow nothing is moved.
    pub fn translate_to(&mut self, x: u32, y: u32) -> Result<()> {
        let dx = x as i64 - self.offset.x as i64;
        let dy = y as i64 - self.offset.y as i64;
        if dx == 0 && dy == 0 {
            return Ok(());
        }
        let moved = self
            .pixels
            .iter()
            .map(|p| p.offset(dx, dy))
            .collect::<Option<Vec<_>>>()
            .ok_or(Error::TranslationOverflow { x, y })?;

        self.pixels = moved;
        self.offset = Point::new(x, y);
        self.rebuild_index();
        Ok(())
    }

    /// Read-only view of this image as if translated to `(x, y)`
    pub fn positioned(&self, x: u32, y: u32) -> PositionedView<'_> {
        PositionedView {
            pixels: &self.pixels,
            dx: x as i64 - self.offset.x as i64,
            dy: y as i64 - self.offset.y as i64,
            anchor: Point::new(x, y),
        }
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        self.index.extend(self.pixels.iter().map(Point::key));
    }
}

/// Borrowed, immutable placement of a pattern at an anchor.
///
/// Positions are computed on the fly from the source pixels, so many views of
/// one pattern can be evaluated concurrently.
#[derive(Debug, Clone, Copy)]
pub struct PositionedView<'a> {
    pixels: &'a [Point],
    dx: i64,
    dy: i64,
    anchor: Point,
}

impl<'a> PositionedView<'a> {
    /// Anchor this view was placed at
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Number of on-pixels in the view
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True when the underlying pattern has no on-pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Placed positions; `None` for a pixel that falls off the u32 grid
    pub fn positions(self) -> impl Iterator<Item = Option<Point>> + 'a {
        let (dx, dy) = (self.dx, self.dy);
        self.pixels.iter().map(move |p| p.offset(dx, dy))
    }
}
