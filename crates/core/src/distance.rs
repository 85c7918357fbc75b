//! Distance field mode.
//!
//! Smooths with the isotropic [`KernelPair::distance`] kernel in
//! unnormalized output mode. Both sums weigh `a + b` together, so the output
//! direction channels are always equal. Every pixel, seeds included, is
//! smoothed; flat markers snap to `(-1, 1, -1)` so they pin the falloff at
//! its floor.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::driver::{self, DEFAULT_DISTANCE_PASSES};
use crate::engine::Engine;
use crate::error::EngineError;
use crate::grid::Grid;
use crate::kernel::KernelPair;
use crate::normal::{DEFAULT_FLAT_THRESHOLD, DEFAULT_SEED_THRESHOLD};
use crate::operator::{Convolution, OperatorConfig, OutputMode};
use crate::params::{param_f64, param_usize};

/// Tunables of the distance field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceParams {
    pub flat_threshold: f64,
    /// Fixed pass count, independent of grid size.
    pub passes: usize,
}

impl Default for DistanceParams {
    fn default() -> Self {
        Self {
            flat_threshold: DEFAULT_FLAT_THRESHOLD,
            passes: DEFAULT_DISTANCE_PASSES,
        }
    }
}

impl DistanceParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            flat_threshold: param_f64(params, "flat_threshold", DEFAULT_FLAT_THRESHOLD),
            passes: param_usize(params, "passes", DEFAULT_DISTANCE_PASSES),
        }
    }

    pub fn operator_config(&self) -> OperatorConfig {
        OperatorConfig {
            // unused: the seed rule is off in this mode
            seed_threshold: DEFAULT_SEED_THRESHOLD,
            flat_threshold: self.flat_threshold,
            preserve_seeds: false,
            output: OutputMode::Unnormalized,
        }
    }

    pub fn convolution(&self) -> Convolution {
        Convolution::new(KernelPair::distance(), self.operator_config())
    }
}

/// Runs the distance field to completion on `grid`.
pub fn distance_field(grid: Grid, params: &DistanceParams) -> Grid {
    driver::run(grid, &params.convolution(), params.passes)
}

/// Step-wise distance field engine.
pub struct DistanceField {
    grid: Grid,
    params: DistanceParams,
    convolution: Convolution,
    done: usize,
}

impl DistanceField {
    pub fn new(grid: Grid, params: DistanceParams) -> Self {
        Self {
            grid,
            convolution: params.convolution(),
            params,
            done: 0,
        }
    }

    pub fn from_json(grid: Grid, params: &Value) -> Self {
        Self::new(grid, DistanceParams::from_json(params))
    }

    /// Consumes the engine, returning the current grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

impl From<DistanceField> for Grid {
    fn from(engine: DistanceField) -> Grid {
        engine.into_grid()
    }
}

impl Engine for DistanceField {
    fn step(&mut self) -> Result<(), EngineError> {
        self.grid = self.convolution.pass(&self.grid);
        self.done += 1;
        Ok(())
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn params(&self) -> Value {
        json!({
            "flat_threshold": self.params.flat_threshold,
            "passes": self.params.passes,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "flat_threshold": {
                "type": "number",
                "default": DEFAULT_FLAT_THRESHOLD,
                "min": 0.0,
                "max": 1.0,
                "description": "Minimum marker value for a pixel to be pinned at the falloff floor"
            },
            "passes": {
                "type": "integer",
                "default": DEFAULT_DISTANCE_PASSES,
                "min": 0,
                "description": "Smoothing pass count; controls falloff softness"
            }
        })
    }

    fn passes_done(&self) -> usize {
        self.done
    }

    fn planned_passes(&self) -> usize {
        self.params.passes
    }
}
