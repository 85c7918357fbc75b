#![deny(unsafe_code)]
//! CLI binary for force-sampler.
//!
//! Subcommands:
//! - `render <pipeline> <input>`: diffuse a seed sketch, write a PNG
//! - `list`: print available pipelines, engines, and their parameters

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use force_sampler_core::{Engine, Grid};
use force_sampler_engines::stats::GridStats;
use force_sampler_engines::{EngineKind, Pipeline, Stage};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(
    name = "force-sampler",
    about = "Diffuse sparse direction seeds into normal and force maps"
)]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Print a line to stderr after every pass.
    #[arg(long, global = true)]
    progress: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a pipeline over a seed image and write the result as PNG.
    Render {
        /// Pipeline name (normal, force, force-smooth, distance).
        pipeline: String,

        /// Source image (8-bit RGB).
        input: PathBuf,

        /// Output file path.
        #[arg(short, long, default_value = "out.png")]
        output: PathBuf,

        /// Pipeline parameters as a JSON string. The force pipelines take
        /// `{"normal": {...}, "distance": {...}}`.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available pipelines and engines.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let pipelines = Pipeline::list_pipelines();
            let engines = EngineKind::list_engines();
            if cli.json {
                let schemas = engine_schemas()?;
                let info = serde_json::json!({
                    "pipelines": pipelines,
                    "engines": schemas,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Pipelines:");
                println!("  {}", pipelines.join(", "));
                println!("Engines:");
                for name in engines {
                    println!("  {name}");
                }
            }
        }
        Command::Render {
            pipeline,
            input,
            output,
            params,
        } => {
            let params: serde_json::Value =
                serde_json::from_str(&params).map_err(CliError::Params)?;

            let pipe = Pipeline::from_name(&pipeline)?;
            let grid = force_sampler_engines::snapshot::read_rgb8(&input)?;
            let (width, height) = (grid.width(), grid.height());
            let source = GridStats::of(&grid);

            let show_progress = cli.progress;
            let mut on_pass = |stage: Stage, i: usize, n: usize| {
                if show_progress {
                    eprintln!("{} pass {i}/{n}", stage.name());
                }
            };
            let out = pipe.run(grid, &params, &mut on_pass)?;

            force_sampler_engines::snapshot::write_rgb8(width, height, out.rgb8, &output)?;

            let result = GridStats::of(&out.field);
            if cli.json {
                let passes: serde_json::Map<String, serde_json::Value> = out
                    .passes
                    .iter()
                    .map(|(stage, n)| (stage.name().to_string(), (*n).into()))
                    .collect();
                let info = serde_json::json!({
                    "pipeline": pipe.name(),
                    "input": input.display().to_string(),
                    "output": output.display().to_string(),
                    "width": width,
                    "height": height,
                    "passes": passes,
                    "seeds": source.seeds,
                    "flat": source.flat,
                    "undetermined": result.undetermined,
                    "coverage": result.coverage(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                let total: usize = out.passes.iter().map(|(_, n)| n).sum();
                eprintln!(
                    "rendered {} ({width}x{height}, {} seeds, {total} passes, {:.1}% covered) -> {}",
                    pipe.name(),
                    source.seeds,
                    result.coverage() * 100.0,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

/// Parameter schema of every registered engine, keyed by name.
fn engine_schemas() -> Result<serde_json::Value, CliError> {
    let sample = Grid::new(1, 1)?;
    let mut schemas = serde_json::Map::new();
    for name in EngineKind::list_engines() {
        let engine = EngineKind::from_name(name, sample.clone(), &serde_json::json!({}))?;
        schemas.insert(name.to_string(), engine.param_schema());
    }
    Ok(serde_json::Value::Object(schemas))
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
