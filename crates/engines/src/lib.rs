#![deny(unsafe_code)]
//! Engine registry, pipelines and PNG snapshot I/O.
//!
//! This crate sits between `force-sampler-core` (which defines the field
//! modes and the `Engine` trait) and the CLI, so name-based dispatch and the
//! normal-map / force-map sequencing live in one place.

pub mod pipeline;
pub mod stats;

#[cfg(feature = "png")]
pub mod snapshot;

use force_sampler_core::error::EngineError;
use force_sampler_core::grid::Grid;
use force_sampler_core::{DistanceField, Engine, NormalField, NormalVariant};
use serde_json::Value;

pub use pipeline::{Pipeline, PipelineOutput, Stage};

/// All available engine names.
const ENGINE_NAMES: &[&str] = &["normal", "normal-force", "normal-smooth", "distance"];

/// Enumeration of all available field engines.
///
/// Wraps each mode and delegates `Engine` trait methods.
/// Use [`EngineKind::from_name`] for string-based construction.
pub enum EngineKind {
    /// Normal field, any variant.
    Normal(NormalField),
    /// Distance field.
    Distance(DistanceField),
}

impl EngineKind {
    /// Constructs an engine by name over `grid`, applying JSON overrides.
    ///
    /// Returns `EngineError::UnknownEngine` if the name is not recognized.
    pub fn from_name(name: &str, grid: Grid, params: &Value) -> Result<Self, EngineError> {
        let variant = match name {
            "normal" => NormalVariant::Standalone,
            "normal-force" => NormalVariant::Force,
            "normal-smooth" => NormalVariant::Smooth,
            "distance" => {
                return Ok(EngineKind::Distance(DistanceField::from_json(grid, params)));
            }
            _ => return Err(EngineError::UnknownEngine(name.to_string())),
        };
        Ok(EngineKind::Normal(NormalField::from_json(grid, variant, params)))
    }

    /// Returns a slice of all recognized engine names.
    pub fn list_engines() -> &'static [&'static str] {
        ENGINE_NAMES
    }

    /// Consumes the engine, returning its current grid.
    pub fn into_grid(self) -> Grid {
        match self {
            EngineKind::Normal(e) => e.into_grid(),
            EngineKind::Distance(e) => e.into_grid(),
        }
    }
}

impl Engine for EngineKind {
    fn step(&mut self) -> Result<(), EngineError> {
        match self {
            EngineKind::Normal(e) => e.step(),
            EngineKind::Distance(e) => e.step(),
        }
    }

    fn grid(&self) -> &Grid {
        match self {
            EngineKind::Normal(e) => e.grid(),
            EngineKind::Distance(e) => e.grid(),
        }
    }

    fn params(&self) -> Value {
        match self {
            EngineKind::Normal(e) => e.params(),
            EngineKind::Distance(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EngineKind::Normal(e) => e.param_schema(),
            EngineKind::Distance(e) => e.param_schema(),
        }
    }

    fn passes_done(&self) -> usize {
        match self {
            EngineKind::Normal(e) => e.passes_done(),
            EngineKind::Distance(e) => e.passes_done(),
        }
    }

    fn planned_passes(&self) -> usize {
        match self {
            EngineKind::Normal(e) => e.planned_passes(),
            EngineKind::Distance(e) => e.planned_passes(),
        }
    }
}
