//! Search configuration with environment overrides
//!
//! - `BLIFF_THRESHOLD`: minimum match ratio (float, default 0.65)
//! - `BLIFF_PARALLEL`: `1` to search rows on the rayon pool
//! - `BLIFF_MARKER`: single character denoting an on-pixel (default `+`)

use crate::error::{Error, Result};
use crate::models::ON_PIXEL;

/// Minimum match ratio used when none is configured
pub const DEFAULT_THRESHOLD: f64 = 0.65;

fn parse_env_f64(name: &str, default: f64) -> f64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

fn parse_env_char(name: &str, default: char) -> char {
    std::env::var(name)
        .ok()
        .and_then(|v| {
            let mut chars = v.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c != '\n' => Some(c),
                _ => None,
            }
        })
        .unwrap_or(default)
}

/// Tunables for a search run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Minimum ratio for a trial to be recorded
    pub threshold: f64,
    /// Spread outer rows across the rayon pool
    pub parallel: bool,
    /// On-pixel marker used when decoding text input
    pub marker: char,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            parallel: false,
            marker: ON_PIXEL,
        }
    }
}

impl SearchConfig {
    /// Defaults overlaid with `BLIFF_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            threshold: parse_env_f64("BLIFF_THRESHOLD", defaults.threshold),
            parallel: parse_env_bool_u8("BLIFF_PARALLEL", defaults.parallel),
            marker: parse_env_char("BLIFF_MARKER", defaults.marker),
        }
    }

    /// Set the minimum match ratio
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Enable or disable the parallel row search
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the on-pixel marker
    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    /// Reject thresholds that are NaN or outside `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}
