//! Iteration driver: repeated full-grid passes of one [`Convolution`].
//!
//! Each pass reads a padded snapshot of the current grid and produces a new
//! grid; the driver holds the only binding to the current grid and replaces
//! it between passes. No convergence check is made.

use crate::grid::Grid;
use crate::operator::Convolution;

/// Default pass count for the distance field.
pub const DEFAULT_DISTANCE_PASSES: usize = 60;

/// Pass count for a normal field of the given size: `floor(max(w, h) / 2)`,
/// but never fewer than one pass.
pub fn default_normal_passes(width: usize, height: usize) -> usize {
    (width.max(height) / 2).max(1)
}

/// Runs exactly `passes` passes of `conv` starting from `initial`.
pub fn run(initial: Grid, conv: &Convolution, passes: usize) -> Grid {
    run_with(initial, conv, passes, |_, _| {})
}

/// Like [`run`], calling `on_pass(i, &grid)` after pass `i` (1-based)
/// completes.
pub fn run_with(
    initial: Grid,
    conv: &Convolution,
    passes: usize,
    mut on_pass: impl FnMut(usize, &Grid),
) -> Grid {
    let mut current = initial;
    for i in 1..=passes {
        current = conv.pass(&current);
        on_pass(i, &current);
    }
    current
}
