//! Dense two-dimensional pixel grid and its zero-padded read snapshot.
//!
//! A [`Grid`] stores `width * height` [`Pixel`]s in row-major order. Passes
//! never read a `Grid` directly: they read a [`PaddedGrid`] built from it,
//! which carries a one-pixel border of [`Pixel::ZERO`] so every interior
//! coordinate has a full 3×3 neighborhood.

use crate::error::EngineError;
use crate::pixel::Pixel;

/// 3×3 window of pixels indexed `[row][column]`, centered on `[1][1]`.
pub type Neighborhood = [[Pixel; 3]; 3];

/// A 2D grid of working-space pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    data: Vec<Pixel>,
}

/// Checks that both dimensions are non-zero and returns the area.
fn checked_area(width: usize, height: usize) -> Result<usize, EngineError> {
    if width == 0 || height == 0 {
        return Err(EngineError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .ok_or(EngineError::InvalidDimensions)
}

impl Grid {
    /// Creates a grid of zero pixels.
    ///
    /// Returns `EngineError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        Self::filled(width, height, Pixel::ZERO)
    }

    /// Creates a grid with every pixel set to `pixel`.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Result<Self, EngineError> {
        let len = checked_area(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![pixel; len],
        })
    }

    /// Creates a grid from a pre-built row-major vector, validating that
    /// `data.len() == width * height`.
    pub fn from_data(width: usize, height: usize, data: Vec<Pixel>) -> Result<Self, EngineError> {
        let expected = checked_area(width, height)?;
        if data.len() != expected {
            return Err(EngineError::DimensionMismatch {
                lhs_w: width,
                lhs_h: height,
                rhs_w: data.len(),
                rhs_h: 1,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds a grid by mapping packed raw `[R, G, B]` samples into working space.
    ///
    /// `raw.len()` must equal `width * height * 3`.
    pub fn from_raw(width: usize, height: usize, raw: &[u8]) -> Result<Self, EngineError> {
        let expected = checked_area(width, height)?
            .checked_mul(3)
            .ok_or(EngineError::InvalidDimensions)?;
        if raw.len() != expected {
            return Err(EngineError::DimensionMismatch {
                lhs_w: width,
                lhs_h: height,
                rhs_w: raw.len() / 3,
                rhs_h: 1,
            });
        }
        let data = raw
            .chunks_exact(3)
            .map(|c| Pixel::from_raw([c[0], c[1], c[2]]))
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Encodes every pixel with [`Pixel::to_raw`] into a packed RGB8 buffer.
    pub fn to_raw(&self) -> Vec<u8> {
        self.data.iter().flat_map(|p| p.to_raw()).collect()
    }

    /// Grid width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[Pixel] {
        &self.data
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, EngineError> {
        if x >= self.width || y >= self.height {
            return Err(EngineError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    /// Gets the pixel at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Result<Pixel, EngineError> {
        Ok(self.data[self.index(x, y)?])
    }

    /// Sets the pixel at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, pixel: Pixel) -> Result<(), EngineError> {
        let idx = self.index(x, y)?;
        self.data[idx] = pixel;
        Ok(())
    }

    /// True when `other` has the same width and height.
    pub fn same_size(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Combines two equally sized grids pixel by pixel.
    ///
    /// Returns `EngineError::DimensionMismatch` if the grids differ in size.
    pub fn zip_with(
        &self,
        other: &Grid,
        f: impl Fn(Pixel, Pixel) -> Pixel,
    ) -> Result<Grid, EngineError> {
        if !self.same_size(other) {
            return Err(EngineError::DimensionMismatch {
                lhs_w: self.width,
                lhs_h: self.height,
                rhs_w: other.width,
                rhs_h: other.height,
            });
        }
        Ok(Grid {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&p, &q)| f(p, q))
                .collect(),
        })
    }

    /// Applies `f` to every pixel, producing a new grid of the same size.
    pub fn map(&self, f: impl Fn(Pixel) -> Pixel) -> Grid {
        Grid {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&p| f(p)).collect(),
        }
    }

    /// Builds a new grid of the same size, computing each pixel from its
    /// coordinate in row-major order.
    pub fn map_xy(&self, f: impl Fn(usize, usize) -> Pixel) -> Grid {
        let w = self.width;
        Grid {
            width: w,
            height: self.height,
            data: (0..self.height)
                .flat_map(|y| (0..w).map(move |x| (x, y)))
                .map(|(x, y)| f(x, y))
                .collect(),
        }
    }

    /// Copies the grid into a zero-bordered snapshot for one pass.
    pub fn padded(&self) -> PaddedGrid {
        let pw = self.width + 2;
        let mut data = vec![Pixel::ZERO; pw * (self.height + 2)];
        for (y, row) in self.data.chunks_exact(self.width).enumerate() {
            let start = (y + 1) * pw + 1;
            data[start..start + self.width].copy_from_slice(row);
        }
        PaddedGrid {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Iterates over all pixels yielding `(x, y, pixel)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Pixel)> + '_ {
        self.data.iter().enumerate().map(|(i, &p)| {
            let x = i % self.width;
            let y = i / self.width;
            (x, y, p)
        })
    }
}

/// Read-only, zero-bordered copy of a [`Grid`].
///
/// `width` and `height` describe the interior; storage is
/// `(width + 2) * (height + 2)`.
#[derive(Debug, Clone)]
pub struct PaddedGrid {
    width: usize,
    height: usize,
    data: Vec<Pixel>,
}

impl PaddedGrid {
    /// Interior width (the source grid's width).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Interior height (the source grid's height).
    pub fn height(&self) -> usize {
        self.height
    }

    /// The interior pixel at `(x, y)`.
    ///
    /// Panics if `(x, y)` is outside the interior.
    pub fn center(&self, x: usize, y: usize) -> Pixel {
        self.data[(y + 1) * (self.width + 2) + x + 1]
    }

    /// The 3×3 window around interior `(x, y)`, border pixels included.
    ///
    /// Panics if `(x, y)` is outside the interior.
    pub fn neighborhood(&self, x: usize, y: usize) -> Neighborhood {
        let pw = self.width + 2;
        let mut nb = [[Pixel::ZERO; 3]; 3];
        for (i, row) in nb.iter_mut().enumerate() {
            let start = (y + i) * pw + x;
            row.copy_from_slice(&self.data[start..start + 3]);
        }
        nb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: usize, height: usize) -> Grid {
        let data = (0..width * height)
            .map(|i| Pixel::new(i as f64, 0.0, -(i as f64)))
            .collect();
        Grid::from_data(width, height, data).unwrap()
    }

    // -- Constructor tests --

    #[test]
    fn new_creates_zero_filled_grid() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.data().len(), 12);
        assert!(grid.data().iter().all(|&p| p == Pixel::ZERO));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(Grid::new(0, 5), Err(EngineError::InvalidDimensions)));
        assert!(matches!(Grid::new(5, 0), Err(EngineError::InvalidDimensions)));
        assert!(Grid::filled(0, 0, Pixel::ZERO).is_err());
    }

    #[test]
    fn overflowing_area_is_rejected() {
        assert!(Grid::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn from_data_rejects_wrong_length() {
        let result = Grid::from_data(2, 2, vec![Pixel::ZERO; 3]);
        assert!(matches!(result, Err(EngineError::DimensionMismatch { .. })));
    }

    #[test]
    fn from_raw_maps_every_sample() {
        let raw = [136, 0, 136, 255, 255, 0];
        let grid = Grid::from_raw(2, 1, &raw).unwrap();
        assert_eq!(grid.get(0, 0).unwrap(), Pixel::ZERO);
        assert_eq!(grid.get(1, 0).unwrap(), Pixel::from_raw([255, 255, 0]));
    }

    #[test]
    fn from_raw_rejects_short_buffer() {
        let result = Grid::from_raw(2, 2, &[0; 11]);
        assert!(matches!(result, Err(EngineError::DimensionMismatch { .. })));
    }

    #[test]
    fn to_raw_has_three_bytes_per_pixel() {
        let grid = Grid::new(5, 3).unwrap();
        let raw = grid.to_raw();
        assert_eq!(raw.len(), 5 * 3 * 3);
        assert!(raw.chunks_exact(3).all(|c| c == [127, 0, 127]));
    }

    // -- Access --

    #[test]
    fn get_after_set_returns_pixel() {
        let mut grid = Grid::new(3, 3).unwrap();
        let p = Pixel::new(0.1, 0.2, 0.3);
        grid.set(2, 1, p).unwrap();
        assert_eq!(grid.get(2, 1).unwrap(), p);
    }

    #[test]
    fn access_outside_bounds_is_an_error() {
        let mut grid = Grid::new(3, 2).unwrap();
        assert!(matches!(
            grid.get(3, 0),
            Err(EngineError::OutOfBounds { x: 3, y: 0, .. })
        ));
        assert!(grid.set(0, 2, Pixel::ZERO).is_err());
    }

    #[test]
    fn iter_yields_row_major_order() {
        let grid = ramp(3, 2);
        let coords: Vec<(usize, usize)> = grid.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    // -- Element-wise --

    #[test]
    fn zip_with_combines_pixels() {
        let a = Grid::filled(2, 2, Pixel::new(1.0, 2.0, 3.0)).unwrap();
        let b = Grid::filled(2, 2, Pixel::new(2.0, 0.5, -1.0)).unwrap();
        let c = a.zip_with(&b, |p, q| p * q).unwrap();
        assert!(c.data().iter().all(|&p| p == Pixel::new(2.0, 1.0, -3.0)));
    }

    #[test]
    fn zip_with_rejects_mismatched_sizes() {
        let a = Grid::new(2, 3).unwrap();
        let b = Grid::new(3, 2).unwrap();
        assert!(matches!(
            a.zip_with(&b, |p, _| p),
            Err(EngineError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn map_does_not_mutate_original() {
        let grid = Grid::filled(2, 2, Pixel::new(1.0, 0.0, 1.0)).unwrap();
        let shifted = grid.map(|p| p + Pixel::new(1.0, 0.0, 1.0));
        assert!(shifted.data().iter().all(|&p| p == Pixel::new(2.0, 0.0, 2.0)));
        assert!(grid.data().iter().all(|&p| p == Pixel::new(1.0, 0.0, 1.0)));
    }

    // -- Padding --

    #[test]
    fn padded_interior_matches_grid() {
        let grid = ramp(4, 3);
        let padded = grid.padded();
        assert_eq!(padded.width(), 4);
        assert_eq!(padded.height(), 3);
        for (x, y, p) in grid.iter() {
            assert_eq!(padded.center(x, y), p, "mismatch at ({x}, {y})");
        }
    }

    #[test]
    fn corner_neighborhood_reads_zero_border() {
        let grid = Grid::filled(2, 2, Pixel::new(1.0, 1.0, 1.0)).unwrap();
        let nb = grid.padded().neighborhood(0, 0);
        assert_eq!(nb[0], [Pixel::ZERO; 3]);
        assert_eq!(nb[1][0], Pixel::ZERO);
        assert_eq!(nb[2][0], Pixel::ZERO);
        assert_eq!(nb[1][1], Pixel::new(1.0, 1.0, 1.0));
        assert_eq!(nb[2][2], Pixel::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn neighborhood_is_row_then_column() {
        let grid = ramp(3, 3);
        let nb = grid.padded().neighborhood(1, 1);
        for (i, row) in nb.iter().enumerate() {
            for (j, p) in row.iter().enumerate() {
                assert_eq!(*p, grid.get(j, i).unwrap(), "window slot [{i}][{j}]");
            }
        }
    }

    #[test]
    fn single_pixel_grid_has_full_zero_ring() {
        let grid = Grid::filled(1, 1, Pixel::new(0.5, 0.5, 0.5)).unwrap();
        let nb = grid.padded().neighborhood(0, 0);
        let non_zero = nb.iter().flatten().filter(|&&p| p != Pixel::ZERO).count();
        assert_eq!(non_zero, 1);
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn dimension() -> impl Strategy<Value = usize> {
            1_usize..=32
        }

        proptest! {
            #[test]
            fn padded_neighborhood_center_is_source_pixel(
                w in dimension(),
                h in dimension(),
            ) {
                let grid = ramp(w, h);
                let padded = grid.padded();
                for (x, y, p) in grid.iter() {
                    prop_assert_eq!(padded.neighborhood(x, y)[1][1], p);
                }
            }

            #[test]
            fn raw_round_trip_preserves_length(
                w in dimension(),
                h in dimension(),
                byte in any::<u8>(),
            ) {
                let raw = vec![byte; w * h * 3];
                let grid = Grid::from_raw(w, h, &raw).unwrap();
                prop_assert_eq!(grid.to_raw().len(), raw.len());
            }
        }
    }
}
