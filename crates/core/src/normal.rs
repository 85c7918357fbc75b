//! Normal field mode.
//!
//! Diffuses sparse direction seeds into a unit direction field with the
//! edge-detecting [`KernelPair::normal`] kernels in normalized output mode.
//! Three variants differ only in configuration:
//!
//! - [`NormalVariant::Standalone`]: seeds preserved, floor 0.5 (normal maps).
//! - [`NormalVariant::Force`]: seeds preserved, floor 0.1 (force maps).
//! - [`NormalVariant::Smooth`]: seeds overwritten, floor 0.1 (softer force maps).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::driver::{self, default_normal_passes};
use crate::engine::Engine;
use crate::error::EngineError;
use crate::grid::Grid;
use crate::kernel::KernelPair;
use crate::operator::{Convolution, OperatorConfig, OutputMode};
use crate::params::{param_bool, param_f64, param_opt_usize};

/// Minimum `|a|` and `|b|` for a pixel to count as a seed.
pub const DEFAULT_SEED_THRESHOLD: f64 = 0.01;
/// Minimum marker value for a pixel to count as flat.
pub const DEFAULT_FLAT_THRESHOLD: f64 = 0.5;
/// Normalization floor of the standalone normal map.
pub const STANDALONE_NORM_FLOOR: f64 = 0.5;
/// Normalization floor of the force-map normal field.
pub const FORCE_NORM_FLOOR: f64 = 0.1;

/// Which preset a [`NormalParams`] starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalVariant {
    #[default]
    Standalone,
    Force,
    Smooth,
}

/// Tunables of the normal field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalParams {
    pub seed_threshold: f64,
    pub flat_threshold: f64,
    /// Sum magnitude below which a pixel resolves to the zero vector.
    pub norm_floor: f64,
    pub preserve_seeds: bool,
    /// Pass count override; `None` derives it from the grid size.
    pub passes: Option<usize>,
}

impl Default for NormalParams {
    fn default() -> Self {
        Self::for_variant(NormalVariant::default())
    }
}

impl NormalParams {
    /// Preset values for `variant`.
    pub fn for_variant(variant: NormalVariant) -> Self {
        let (norm_floor, preserve_seeds) = match variant {
            NormalVariant::Standalone => (STANDALONE_NORM_FLOOR, true),
            NormalVariant::Force => (FORCE_NORM_FLOOR, true),
            NormalVariant::Smooth => (FORCE_NORM_FLOOR, false),
        };
        Self {
            seed_threshold: DEFAULT_SEED_THRESHOLD,
            flat_threshold: DEFAULT_FLAT_THRESHOLD,
            norm_floor,
            preserve_seeds,
            passes: None,
        }
    }

    /// Starts from the `variant` preset and overrides any keys present in `params`.
    pub fn from_json(variant: NormalVariant, params: &Value) -> Self {
        let base = Self::for_variant(variant);
        Self {
            seed_threshold: param_f64(params, "seed_threshold", base.seed_threshold),
            flat_threshold: param_f64(params, "flat_threshold", base.flat_threshold),
            norm_floor: param_f64(params, "norm_floor", base.norm_floor),
            preserve_seeds: param_bool(params, "preserve_seeds", base.preserve_seeds),
            passes: param_opt_usize(params, "passes").or(base.passes),
        }
    }

    pub fn operator_config(&self) -> OperatorConfig {
        OperatorConfig {
            seed_threshold: self.seed_threshold,
            flat_threshold: self.flat_threshold,
            preserve_seeds: self.preserve_seeds,
            output: OutputMode::Normalized {
                floor: self.norm_floor,
            },
        }
    }

    pub fn convolution(&self) -> Convolution {
        Convolution::new(KernelPair::normal(), self.operator_config())
    }

    /// The override if set, else `floor(max(width, height) / 2)` (at least 1).
    pub fn pass_count(&self, width: usize, height: usize) -> usize {
        self.passes
            .unwrap_or_else(|| default_normal_passes(width, height))
    }
}

/// Runs the normal field to completion on `grid`.
pub fn normal_field(grid: Grid, params: &NormalParams) -> Grid {
    let passes = params.pass_count(grid.width(), grid.height());
    driver::run(grid, &params.convolution(), passes)
}

/// Step-wise normal field engine.
pub struct NormalField {
    grid: Grid,
    params: NormalParams,
    convolution: Convolution,
    planned: usize,
    done: usize,
}

impl NormalField {
    pub fn new(grid: Grid, params: NormalParams) -> Self {
        let planned = params.pass_count(grid.width(), grid.height());
        Self {
            grid,
            convolution: params.convolution(),
            params,
            planned,
            done: 0,
        }
    }

    /// Creates an engine from the `variant` preset plus JSON overrides.
    pub fn from_json(grid: Grid, variant: NormalVariant, params: &Value) -> Self {
        Self::new(grid, NormalParams::from_json(variant, params))
    }

    pub fn normal_params(&self) -> &NormalParams {
        &self.params
    }

    /// Consumes the engine, returning the current grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

impl From<NormalField> for Grid {
    fn from(engine: NormalField) -> Grid {
        engine.into_grid()
    }
}

impl Engine for NormalField {
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
            "seed_threshold": self.params.seed_threshold,
            "flat_threshold": self.params.flat_threshold,
            "norm_floor": self.params.norm_floor,
            "preserve_seeds": self.params.preserve_seeds,
            "passes": self.planned,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "seed_threshold": {
                "type": "number",
                "default": DEFAULT_SEED_THRESHOLD,
                "min": 0.0,
                "max": 1.0,
                "description": "Minimum |a| and |b| for a pixel to be kept as a seed"
            },
            "flat_threshold": {
                "type": "number",
                "default": DEFAULT_FLAT_THRESHOLD,
                "min": 0.0,
                "max": 1.0,
                "description": "Minimum marker value for a pixel to be snapped flat"
            },
            "norm_floor": {
                "type": "number",
                "default": STANDALONE_NORM_FLOOR,
                "min": 0.0,
                "max": 10.0,
                "description": "Sum magnitude below which a pixel stays undetermined (0.1 for force maps)"
            },
            "preserve_seeds": {
                "type": "boolean",
                "default": true,
                "description": "Keep seed pixels unchanged on every pass (false for the smooth variant)"
            },
            "passes": {
                "type": "integer",
                "default": null,
                "min": 0,
                "description": "Pass count; defaults to half the longest side"
            }
        })
    }

    fn passes_done(&self) -> usize {
        self.done
    }

    fn planned_passes(&self) -> usize {
        self.planned
    }
}
