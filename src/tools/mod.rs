//! Helpers shared by the CLI, benches, and integration tests
//!
//! Loading scans and targets from disk, the built-in samples, and report
//! rendering.

pub mod report;
pub mod samples;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DecodeError, Error, Result};
use crate::models::{SparseImage, Target};
use crate::utils::raster::from_luma_otsu;

pub use report::{RenderKind, Rendered, render};

const RASTER_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

fn is_raster(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| RASTER_EXTENSIONS.contains(&ext.as_str()))
}

/// Read a text file, rejecting non-UTF-8 content as a decode error
pub fn load_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|err| Error::Decode(DecodeError::Utf8(err.utf8_error())))
}

/// Load a scan from a text grid or a raster image.
///
/// Both kinds must contain at least one on-pixel. Raster scans are
/// thresholded with Otsu's method, dark pixels on.
pub fn load_scan<P: AsRef<Path>>(path: P, marker: char) -> Result<SparseImage> {
    let path = path.as_ref();
    if is_raster(path) {
        let gray = image::open(path)?.to_luma8();
        let scan = from_luma_otsu(&gray);
        if scan.is_empty() {
            return Err(DecodeError::NoOnPixels { marker }.into());
        }
        return Ok(scan);
    }
    let bytes = fs::read(path)?;
    Ok(SparseImage::decode(&bytes, marker)?)
}

/// Load a target pattern from a text grid
pub fn load_target<P: AsRef<Path>>(name: &str, path: P, marker: char) -> Result<Target> {
    let text = load_text(path)?;
    Target::from_image(name, SparseImage::build_with_marker(&text, marker))
}

/// Split a `NAME=PATH` argument
pub fn parse_target_spec(spec: &str) -> Result<(String, PathBuf)> {
    match spec.split_once('=') {
        Some((name, path)) if !name.trim().is_empty() && !path.trim().is_empty() => {
            Ok((name.trim().to_string(), PathBuf::from(path.trim())))
        }
        _ => Err(Error::InvalidTargetSpec(spec.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn write_temp_file(ext: &str, contents: &[u8]) -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before UNIX epoch")
            .as_nanos();
        let sequence = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        path.push(format!("bliffoscope_{nanos}_{sequence}.{ext}"));
        fs::write(&path, contents).expect("failed to write temp file");
        path
    }

    #[test]
    fn test_parse_target_spec() {
        let (name, path) = parse_target_spec("Star Ship=patterns/star.txt").unwrap();
        assert_eq!(name, "Star Ship");
        assert_eq!(path, PathBuf::from("patterns/star.txt"));

        assert!(matches!(parse_target_spec("nopath"), Err(Error::InvalidTargetSpec(_))));
        assert!(parse_target_spec("=x.txt").is_err());
        assert!(parse_target_spec("name=").is_err());
    }

    #[test]
    fn test_load_scan_text() {
        let path = write_temp_file("txt", b" + \n+ +\n");
        let scan = load_scan(&path, '+').unwrap();
        assert_eq!(scan.len(), 3);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_scan_requires_on_pixels() {
        let path = write_temp_file("txt", b"   \n   \n");
        let err = load_scan(&path, '+').unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::NoOnPixels { marker: '+' })));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_target_rejects_invalid_utf8_and_blank() {
        let bad = write_temp_file("txt", &[b'+', 0xff]);
        assert!(matches!(
            load_target("bad", &bad, '+'),
            Err(Error::Decode(DecodeError::Utf8(_)))
        ));
        let _ = fs::remove_file(bad);

        let blank = write_temp_file("txt", b"    ");
        assert!(matches!(
            load_target("blank", &blank, '+'),
            Err(Error::DegenerateTarget { .. })
        ));
        let _ = fs::remove_file(blank);
    }

    #[test]
    fn test_load_scan_raster() {
        let mut gray = image::GrayImage::from_pixel(4, 3, image::Luma([240]));
        gray.put_pixel(1, 1, image::Luma([10]));
        gray.put_pixel(3, 2, image::Luma([10]));

        let mut path = std::env::temp_dir();
        let sequence = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        path.push(format!("bliffoscope_raster_{}_{sequence}.png", std::process::id()));
        gray.save(&path).expect("failed to write temp png");

        let scan = load_scan(&path, '+').unwrap();
        assert_eq!(scan.len(), 2);
        assert_eq!(scan.size(), (3, 2));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_scan_blank_raster_is_rejected() {
        let gray = image::GrayImage::from_pixel(5, 4, image::Luma([255]));

        let mut path = std::env::temp_dir();
        let sequence = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        path.push(format!("bliffoscope_blank_{}_{sequence}.png", std::process::id()));
        gray.save(&path).expect("failed to write temp png");

        let err = load_scan(&path, '+').unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::NoOnPixels { .. })));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_scan("/nonexistent/bliffoscope/scan.txt", '+').unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
