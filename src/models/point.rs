/// Integer point for grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Point {
    /// X coordinate (column)
    pub x: u32,
    /// Y coordinate (row)
    pub y: u32,
}

impl Point {
    /// Create a new point
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Composite index key for this coordinate
    pub fn key(&self) -> PixelKey {
        PixelKey(((self.x as u64) << 32) | self.y as u64)
    }

    /// Offset by a signed delta, `None` if the result leaves the u32 grid
    pub fn offset(&self, dx: i64, dy: i64) -> Option<Self> {
        let x = u32::try_from(self.x as i64 + dx).ok()?;
        let y = u32::try_from(self.y as i64 + dy).ok()?;
        Some(Self { x, y })
    }
}

impl From<(u32, u32)> for Point {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}

/// Composite membership key derived from an `(x, y)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelKey(u64);

impl PixelKey {
    /// Recover the coordinate this key was built from
    pub fn point(&self) -> Point {
        Point::new((self.0 >> 32) as u32, self.0 as u32)
    }
}
