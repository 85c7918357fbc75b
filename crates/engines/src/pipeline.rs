//! Normal-map, force-map and distance-map pipelines.
//!
//! A pipeline takes the working-space grid decoded from the source image,
//! runs one or two field engines to completion, and encodes the result to
//! packed RGB8 samples of the same dimensions.
//!
//! Parameters for single-stage pipelines are read from the top level of the
//! JSON object. The force map reads its normal-stage overrides from
//! `params["normal"]` and its distance-stage overrides from
//! `params["distance"]`.

use force_sampler_core::compositor::compose;
use force_sampler_core::error::EngineError;
use force_sampler_core::grid::Grid;
use force_sampler_core::{DistanceField, Engine, NormalField, NormalVariant};
use serde_json::Value;

const PIPELINE_NAMES: &[&str] = &["normal", "force", "force-smooth", "distance"];

/// Which engine a progress callback refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Normal,
    Distance,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Normal => "normal",
            Stage::Distance => "distance",
        }
    }
}

/// A complete source-image-to-output-image sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    /// Standalone normal field, encoded directly.
    NormalMap,
    /// Normal field modulated by a distance field. `smooth` selects the
    /// variant that lets seeds be overwritten.
    ForceMap { smooth: bool },
    /// Distance field alone, encoded directly.
    DistanceMap,
}

/// Final field and its encoded samples.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Working-space result before encoding.
    pub field: Grid,
    /// Packed RGB8 samples, `width * height * 3` bytes.
    pub rgb8: Vec<u8>,
    /// Passes run per stage, in execution order.
    pub passes: Vec<(Stage, usize)>,
}

impl PipelineOutput {
    pub fn width(&self) -> usize {
        self.field.width()
    }

    pub fn height(&self) -> usize {
        self.field.height()
    }
}

impl Pipeline {
    /// Looks a pipeline up by name.
    ///
    /// Returns `EngineError::UnknownPipeline` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        match name {
            "normal" => Ok(Pipeline::NormalMap),
            "force" => Ok(Pipeline::ForceMap { smooth: false }),
            "force-smooth" => Ok(Pipeline::ForceMap { smooth: true }),
            "distance" => Ok(Pipeline::DistanceMap),
            _ => Err(EngineError::UnknownPipeline(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Pipeline::NormalMap => "normal",
            Pipeline::ForceMap { smooth: false } => "force",
            Pipeline::ForceMap { smooth: true } => "force-smooth",
            Pipeline::DistanceMap => "distance",
        }
    }

    /// Returns a slice of all recognized pipeline names.
    pub fn list_pipelines() -> &'static [&'static str] {
        PIPELINE_NAMES
    }

    /// Runs the pipeline on `input`.
    ///
    /// `on_pass(stage, i, planned)` is called after pass `i` (1-based) of
    /// each stage.
    pub fn run(
        self,
        input: Grid,
        params: &Value,
        on_pass: &mut dyn FnMut(Stage, usize, usize),
    ) -> Result<PipelineOutput, EngineError> {
        match self {
            Pipeline::NormalMap => {
                let engine = NormalField::from_json(input, NormalVariant::Standalone, params);
                let (field, passes) = run_stage(engine, Stage::Normal, on_pass)?;
                Ok(encode(field, vec![(Stage::Normal, passes)]))
            }
            Pipeline::DistanceMap => {
                let engine = DistanceField::from_json(input, params);
                let (field, passes) = run_stage(engine, Stage::Distance, on_pass)?;
                Ok(encode(field, vec![(Stage::Distance, passes)]))
            }
            Pipeline::ForceMap { smooth } => {
                let variant = if smooth {
                    NormalVariant::Smooth
                } else {
                    NormalVariant::Force
                };
                let normal_params = params.get("normal").unwrap_or(&Value::Null);
                let distance_params = params.get("distance").unwrap_or(&Value::Null);

                let normal = NormalField::from_json(input.clone(), variant, normal_params);
                let (normal, normal_passes) = run_stage(normal, Stage::Normal, on_pass)?;

                let distance = DistanceField::from_json(input, distance_params);
                let (distance, distance_passes) = run_stage(distance, Stage::Distance, on_pass)?;

                let force = compose(&normal, &distance)?;
                Ok(encode(
                    force,
                    vec![
                        (Stage::Normal, normal_passes),
                        (Stage::Distance, distance_passes),
                    ],
                ))
            }
        }
    }
}

/// Drives `engine` to completion, returning its grid and pass count.
fn run_stage<E>(
    mut engine: E,
    stage: Stage,
    on_pass: &mut dyn FnMut(Stage, usize, usize),
) -> Result<(Grid, usize), EngineError>
where
    E: Engine + Into<Grid>,
{
    let planned = engine.planned_passes();
    engine.run_to_end(&mut |i, _| on_pass(stage, i, planned))?;
    let done = engine.passes_done();
    Ok((engine.into(), done))
}

fn encode(field: Grid, passes: Vec<(Stage, usize)>) -> PipelineOutput {
    let rgb8 = field.to_raw();
    PipelineOutput {
        field,
        rgb8,
        passes,
    }
}
