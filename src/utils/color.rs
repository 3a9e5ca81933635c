//! Display color sources for match records
//!
//! Colors avoid the very dark and very light ends of the scale: each channel
//! is drawn from `[30, 230)`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::Color;

/// Lowest channel value (inclusive)
pub const CHANNEL_MIN: u8 = 30;
/// Highest channel value (exclusive)
pub const CHANNEL_MAX: u8 = 230;

/// Supplies one color per emitted match record
pub trait ColorSource {
    /// Next color; every channel must lie in `[CHANNEL_MIN, CHANNEL_MAX)`
    fn next_color(&mut self) -> Color;
}

/// Independent uniform channels from a seedable RNG
#[derive(Debug, Clone)]
pub struct RandomColors {
    rng: StdRng,
}

impl RandomColors {
    /// Seed from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn channel(&mut self) -> u8 {
        self.rng.gen_range(CHANNEL_MIN..CHANNEL_MAX)
    }
}

impl Default for RandomColors {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorSource for RandomColors {
    fn next_color(&mut self) -> Color {
        let r = self.channel();
        let g = self.channel();
        let b = self.channel();
        Color::new(r, g, b)
    }
}

/// Repeats a fixed palette, for reproducible output in tests
#[derive(Debug, Clone)]
pub struct CycleColors {
    palette: Vec<Color>,
    next: usize,
}

impl CycleColors {
    /// Cycle through `palette`; channels are clamped into the legal range
    pub fn new(palette: Vec<Color>) -> Self {
        let palette = if palette.is_empty() {
            vec![Color::new(CHANNEL_MIN, CHANNEL_MIN, CHANNEL_MIN)]
        } else {
            palette
                .into_iter()
                .map(|c| Color::new(clamp(c.r), clamp(c.g), clamp(c.b)))
                .collect()
        };
        Self { palette, next: 0 }
    }
}

fn clamp(channel: u8) -> u8 {
    channel.clamp(CHANNEL_MIN, CHANNEL_MAX - 1)
}

impl ColorSource for CycleColors {
    fn next_color(&mut self) -> Color {
        let color = self.palette[self.next % self.palette.len()];
        self.next = self.next.wrapping_add(1);
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_channels_in_range() {
        let mut source = RandomColors::new();
        for _ in 0..2000 {
            for c in source.next_color().channels() {
                assert!((CHANNEL_MIN..CHANNEL_MAX).contains(&c), "channel {c}");
            }
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RandomColors::seeded(7);
        let mut b = RandomColors::seeded(7);
        for _ in 0..16 {
            assert_eq!(a.next_color(), b.next_color());
        }
    }

    #[test]
    fn test_cycle_wraps_and_clamps() {
        let mut source = CycleColors::new(vec![Color::new(0, 100, 255), Color::new(50, 60, 70)]);
        assert_eq!(source.next_color(), Color::new(30, 100, 229));
        assert_eq!(source.next_color(), Color::new(50, 60, 70));
        assert_eq!(source.next_color(), Color::new(30, 100, 229));

        let mut fallback = CycleColors::new(Vec::new());
        assert_eq!(fallback.next_color(), Color::new(30, 30, 30));
    }
}
