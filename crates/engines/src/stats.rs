//! Per-grid classification counts reported by the CLI.

use force_sampler_core::grid::Grid;
use force_sampler_core::normal::{DEFAULT_FLAT_THRESHOLD, DEFAULT_SEED_THRESHOLD};
use force_sampler_core::Pixel;

/// How many pixels of a grid fall into each sentinel class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridStats {
    pub total: usize,
    /// Both direction components above the seed threshold.
    pub seeds: usize,
    /// Marker above the flat threshold.
    pub flat: usize,
    /// Exactly the zero pixel and not flat: no direction determined yet.
    pub undetermined: usize,
}

impl GridStats {
    /// Counts with the default seed and flat thresholds.
    pub fn of(grid: &Grid) -> Self {
        Self::with_thresholds(grid, DEFAULT_SEED_THRESHOLD, DEFAULT_FLAT_THRESHOLD)
    }

    pub fn with_thresholds(grid: &Grid, seed_threshold: f64, flat_threshold: f64) -> Self {
        grid.data().iter().fold(
            Self {
                total: grid.data().len(),
                ..Self::default()
            },
            |mut acc, &p| {
                if p.is_seed(seed_threshold) {
                    acc.seeds += 1;
                }
                if p.is_flat(flat_threshold) {
                    acc.flat += 1;
                } else if p == Pixel::ZERO {
                    acc.undetermined += 1;
                }
                acc
            },
        )
    }

    /// Fraction of pixels that are neither flat nor undetermined.
    pub fn coverage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.total - self.flat - self.undetermined) as f64 / self.total as f64
    }
}
