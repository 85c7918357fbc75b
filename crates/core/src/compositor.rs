//! Force-map compositor.
//!
//! The distance field, shifted from [-1, 1] into [0, 2], is used as a
//! magnitude envelope over the unit directions of the normal field.

use crate::error::EngineError;
use crate::grid::Grid;
use crate::pixel::Pixel;

/// Shift applied to the distance field before it modulates the normals.
pub const DISTANCE_SHIFT: Pixel = Pixel::new(1.0, 0.0, 1.0);

/// Multiplies `normal` element-wise by `distance + (1, 0, 1)`.
///
/// Returns `EngineError::DimensionMismatch` if the grids differ in size.
pub fn compose(normal: &Grid, distance: &Grid) -> Result<Grid, EngineError> {
    normal.zip_with(distance, |n, d| n * (d + DISTANCE_SHIFT))
}

/// [`compose`], then encode to packed RGB8 via
/// `(p + (1, 0, 1)) * (127.5, 255, 127.5)`.
pub fn compose_rgb8(normal: &Grid, distance: &Grid) -> Result<Vec<u8>, EngineError> {
    Ok(compose(normal, distance)?.to_raw())
}
