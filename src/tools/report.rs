//! Report renderers for search outcomes
//!
//! Renderers live outside the matching core; they only read a
//! [`SearchOutcome`] and the scan it was produced from.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::str::FromStr;

use image::{Rgb, RgbImage};

use crate::detector::search::SearchOutcome;
use crate::error::Result;
use crate::models::{Color, Point, SparseImage};

/// Side of the square block drawn per grid cell on the canvas
pub const CELL_SIZE: u32 = 5;

const SCAN_GRAY: Rgb<u8> = Rgb([128, 128, 128]);
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Available report renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderKind {
    /// Plain text list of matches
    #[default]
    List,
    /// Raster with the scan and color-coded matches
    Canvas,
}

impl FromStr for RenderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" | "text" => Ok(RenderKind::List),
            "canvas" | "png" => Ok(RenderKind::Canvas),
            other => Err(format!("unknown renderer '{other}', expected list or canvas")),
        }
    }
}

/// Output of a renderer
#[derive(Debug, Clone)]
pub enum Rendered {
    /// Text report
    Text(String),
    /// Raster report
    Canvas(RgbImage),
}

/// Render `outcome` with the renderer selected by `kind`
pub fn render(kind: RenderKind, scan: &SparseImage, outcome: &SearchOutcome<'_>) -> Result<Rendered> {
    match kind {
        RenderKind::List => Ok(Rendered::Text(render_list(outcome))),
        RenderKind::Canvas => render_canvas(scan, outcome).map(Rendered::Canvas),
    }
}

/// Count, elapsed seconds, then one line per match
pub fn render_list(outcome: &SearchOutcome<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Targets found: {}", outcome.len());
    let _ = writeln!(out, "Execution time: {:.3}s", outcome.elapsed.as_secs_f64());
    if outcome.cancelled {
        let _ = writeln!(out, "Search cancelled after {} positions", outcome.positions_tried);
    }
    for record in outcome.iter() {
        let Color { r, g, b } = record.color;
        let _ = writeln!(
            out,
            "{} @ {}.{} - {:.2}% ACC rgb({}, {}, {})",
            record.target_name(),
            record.position.x,
            record.position.y,
            record.ratio * 100.0,
            r,
            g,
            b
        );
    }
    out
}

/// Draw the scan in gray and each match at half opacity in its color.
///
/// A cell already painted by an earlier match is painted at full opacity.
/// Pattern pixels beyond the scan bounds are clipped.
pub fn render_canvas(scan: &SparseImage, outcome: &SearchOutcome<'_>) -> Result<RgbImage> {
    let (w, h) = scan.size();
    let (cols, rows) = if scan.is_empty() { (0, 0) } else { (w + 1, h + 1) };
    let mut canvas = RgbImage::from_pixel(cols * CELL_SIZE, rows * CELL_SIZE, BACKGROUND);

    for &p in scan.pixels() {
        fill_cell(&mut canvas, p, SCAN_GRAY);
    }

    let mut painted: HashSet<Point> = HashSet::new();
    for record in outcome.iter() {
        let placed = record.positioned()?;
        let color = Rgb(record.color.channels());
        for &p in placed.pixels() {
            if p.x >= cols || p.y >= rows {
                continue;
            }
            let fill = if painted.insert(p) {
                blend(cell_color(&canvas, p), color)
            } else {
                color
            };
            fill_cell(&mut canvas, p, fill);
        }
    }

    Ok(canvas)
}

fn cell_color(canvas: &RgbImage, p: Point) -> Rgb<u8> {
    *canvas.get_pixel(p.x * CELL_SIZE, p.y * CELL_SIZE)
}

fn blend(under: Rgb<u8>, over: Rgb<u8>) -> Rgb<u8> {
    let mix = |a: u8, b: u8| ((a as u16 + b as u16) / 2) as u8;
    Rgb([
        mix(under.0[0], over.0[0]),
        mix(under.0[1], over.0[1]),
        mix(under.0[2], over.0[2]),
    ])
}

fn fill_cell(canvas: &mut RgbImage, p: Point, color: Rgb<u8>) {
    let x0 = p.x * CELL_SIZE;
    let y0 = p.y * CELL_SIZE;
    for y in y0..y0 + CELL_SIZE {
        for x in x0..x0 + CELL_SIZE {
            canvas.put_pixel(x, y, color);
        }
    }
}
