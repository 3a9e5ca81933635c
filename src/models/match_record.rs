use super::{Point, SparseImage, Target};
use crate::error::Result;

/// Display color attached to a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a new color
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// A placement of a target whose match ratio passed the threshold
#[derive(Debug, Clone, Copy)]
pub struct MatchRecord<'a> {
    /// Target that matched
    pub target: &'a Target,
    /// Anchor the pattern was translated to
    pub position: Point,
    /// Fraction of pattern pixels covered by the scan
    pub ratio: f64,
    /// Display color chosen once for this record
    pub color: Color,
}

impl<'a> MatchRecord<'a> {
    /// Name of the matched target
    pub fn target_name(&self) -> &'a str {
        self.target.name()
    }

    /// Owned copy of the target pattern placed where it matched
    pub fn positioned(&self) -> Result<SparseImage> {
        let mut image = self.target.pattern().clone();
        image.translate_to(self.position.x, self.position.y)?;
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positioned_leaves_target_untouched() {
        let target = Target::new("corner", "++\n+").unwrap();
        let record = MatchRecord {
            target: &target,
            position: Point::new(3, 4),
            ratio: 1.0,
            color: Color::new(30, 40, 50),
        };

        let placed = record.positioned().unwrap();
        assert_eq!(
            placed.pixels(),
            &[Point::new(3, 4), Point::new(4, 4), Point::new(3, 5)]
        );
        assert_eq!(target.pattern().offset(), Point::new(0, 0));
        assert_eq!(record.target_name(), "corner");
        assert_eq!(record.color.channels(), [30, 40, 50]);
    }
}
