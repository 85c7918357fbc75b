//! PNG decode and encode of RGB8 images.
//!
//! This module is feature-gated behind `png` (default on) so the engines can
//! be used without pulling in the `image` crate. Only 8-bit, three-channel
//! images are accepted; anything else is an input error rather than being
//! silently converted.

use force_sampler_core::error::EngineError;
use force_sampler_core::grid::Grid;
use image::{DynamicImage, ImageError, RgbImage};
use std::path::Path;

fn image_error(e: ImageError) -> EngineError {
    match e {
        ImageError::IoError(io) => EngineError::Io(io.to_string()),
        other => EngineError::InvalidInput(other.to_string()),
    }
}

/// Reads an RGB8 image into a working-space grid.
///
/// Returns `EngineError::Io` if the file cannot be read,
/// `EngineError::InvalidInput` if it cannot be decoded or is not RGB8, and
/// `EngineError::InvalidDimensions` for an empty image.
pub fn read_rgb8(path: &Path) -> Result<Grid, EngineError> {
    let img = image::open(path).map_err(image_error)?;
    let rgb = match img {
        DynamicImage::ImageRgb8(buf) => buf,
        other => {
            return Err(EngineError::InvalidInput(format!(
                "{}: expected an 8-bit RGB image, got {:?}",
                path.display(),
                other.color()
            )))
        }
    };
    Grid::from_raw(rgb.width() as usize, rgb.height() as usize, rgb.as_raw())
}

/// Writes packed RGB8 samples as an image; the format follows the extension.
///
/// Returns `EngineError::InvalidDimensions` if a dimension overflows `u32`,
/// or `EngineError::Io` on a buffer size mismatch or write failure.
pub fn write_rgb8(
    width: usize,
    height: usize,
    rgb8: Vec<u8>,
    path: &Path,
) -> Result<(), EngineError> {
    let w = u32::try_from(width).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(height).map_err(|_| EngineError::InvalidDimensions)?;
    let img = RgbImage::from_raw(w, h, rgb8)
        .ok_or_else(|| EngineError::Io("RGB buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))
}

/// Encodes `grid` with [`Grid::to_raw`] and writes it.
pub fn write_png(grid: &Grid, path: &Path) -> Result<(), EngineError> {
    write_rgb8(grid.width(), grid.height(), grid.to_raw(), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use force_sampler_core::Pixel;
    use image::RgbaImage;

    #[test]
    fn write_then_read_preserves_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sketch.png");
        let raw: Vec<u8> = (0..4 * 3 * 3).map(|i| (i * 7) as u8).collect();

        write_rgb8(4, 3, raw.clone(), &path).unwrap();
        let grid = read_rgb8(&path).unwrap();

        assert_eq!((grid.width(), grid.height()), (4, 3));
        assert_eq!(grid, Grid::from_raw(4, 3, &raw).unwrap());
    }

    #[test]
    fn write_png_encodes_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("field.png");
        let grid = Grid::filled(5, 2, Pixel::new(1.0, 1.0, -1.0)).unwrap();

        write_png(&grid, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!((img.width(), img.height()), (5, 2));
        assert!(img.pixels().all(|p| p.0 == [255, 255, 0]));
    }

    #[test]
    fn rgba_input_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        RgbaImage::new(2, 2).save(&path).unwrap();

        let result = read_rgb8(&path);
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_rgb8(&dir.path().join("nope.png"));
        assert!(matches!(result, Err(EngineError::Io(_))));
    }

    #[test]
    fn corrupt_file_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(matches!(
            read_rgb8(&path),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn buffer_size_mismatch_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let result = write_rgb8(4, 4, vec![0; 10], &dir.path().join("short.png"));
        assert!(matches!(result, Err(EngineError::Io(_))));
    }
}
