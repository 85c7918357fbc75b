//! Directional convolution operator.
//!
//! One output pixel is decided from the center of a [`PaddedGrid`] window,
//! first match wins:
//!
//! 1. **seed**: with `preserve_seeds` in normalized mode, a pixel whose `a`
//!    and `b` both exceed `seed_threshold` in magnitude is copied unchanged.
//! 2. **flat**: a pixel whose marker exceeds `flat_threshold` becomes the
//!    mode's fixed flat vector.
//! 3. **diffusion**: the kernel pair weighs the full 3×3×3 window into sums
//!    `(A, B)`, which are normalized or clamped according to [`OutputMode`].

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, PaddedGrid};
use crate::kernel::KernelPair;
use crate::pixel::Pixel;

/// Flat-marker output in normalized mode.
pub const FLAT_NORMALIZED: Pixel = Pixel::new(0.0, 1.0, 0.0);
/// Flat-marker output in unnormalized mode.
pub const FLAT_UNNORMALIZED: Pixel = Pixel::new(-1.0, 1.0, -1.0);

/// How diffusion sums become an output pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum OutputMode {
    /// Unit direction `(A/n, 0, B/n)`, or zero when `n < floor` or `n == 0`.
    Normalized { floor: f64 },
    /// `(clamp(A), 0, clamp(B))` with both sums clamped to [-1, 1].
    Unnormalized,
}

impl OutputMode {
    /// The fixed vector written for flat-marker pixels.
    pub fn flat(self) -> Pixel {
        match self {
            OutputMode::Normalized { .. } => FLAT_NORMALIZED,
            OutputMode::Unnormalized => FLAT_UNNORMALIZED,
        }
    }

    /// Turns diffusion sums into an output pixel.
    pub fn resolve(self, sum_a: f64, sum_b: f64) -> Pixel {
        match self {
            OutputMode::Normalized { floor } => {
                let n = (sum_a * sum_a + sum_b * sum_b).sqrt();
                // a zero sum has no direction, whatever the floor
                if n < floor || n == 0.0 {
                    Pixel::ZERO
                } else {
                    Pixel::new(sum_a / n, 0.0, sum_b / n)
                }
            }
            OutputMode::Unnormalized => {
                Pixel::new(sum_a.clamp(-1.0, 1.0), 0.0, sum_b.clamp(-1.0, 1.0))
            }
        }
    }

    pub fn is_normalized(self) -> bool {
        matches!(self, OutputMode::Normalized { .. })
    }
}

/// Sentinel thresholds and output behavior shared by every field mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatorConfig {
    pub seed_threshold: f64,
    pub flat_threshold: f64,
    pub preserve_seeds: bool,
    pub output: OutputMode,
}

/// A kernel pair bound to an operator configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Convolution {
    pub kernels: KernelPair,
    pub config: OperatorConfig,
}

impl Convolution {
    pub fn new(kernels: KernelPair, config: OperatorConfig) -> Self {
        Self { kernels, config }
    }

    /// Computes the output pixel for interior coordinate `(x, y)`.
    ///
    /// Pure: reads only `padded`. Panics if `(x, y)` is outside the interior.
    pub fn apply(&self, padded: &PaddedGrid, x: usize, y: usize) -> Pixel {
        let cfg = &self.config;
        let center = padded.center(x, y);

        if cfg.preserve_seeds && cfg.output.is_normalized() && center.is_seed(cfg.seed_threshold) {
            return center;
        }
        if center.is_flat(cfg.flat_threshold) {
            return cfg.output.flat();
        }
        let (sum_a, sum_b) = self.kernels.weigh(&padded.neighborhood(x, y));
        cfg.output.resolve(sum_a, sum_b)
    }

    /// Applies the operator at every coordinate of `grid`, producing a fresh
    /// grid of the same dimensions. `grid` itself is never modified.
    pub fn pass(&self, grid: &Grid) -> Grid {
        let padded = grid.padded();
        grid.map_xy(|x, y| self.apply(&padded, x, y))
    }
}
