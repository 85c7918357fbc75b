//! CLI failures and the exit code each one maps to.
//!
//! Clap exits with 2 on bad arguments before any of this runs. Everything
//! after argument parsing lands in one of the [`CliError`] variants below,
//! and `main` exits with [`CliError::exit_code`].

use force_sampler_core::EngineError;
use thiserror::Error;

/// Unknown pipeline or engine, or a grid shape the engines refuse.
pub const EXIT_ENGINE: i32 = 10;
/// The source image could not be read or the output could not be written.
pub const EXIT_IO: i32 = 11;
/// The source image or `--params` was readable but unusable.
pub const EXIT_INPUT: i32 = 12;
/// The `--json` report could not be serialized.
pub const EXIT_REPORT: i32 = 13;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(EngineError),
    /// Reading the seed image or writing the rendered PNG failed.
    #[error("{0}")]
    Io(String),
    /// The seed image decoded but is not 8-bit RGB, or did not decode.
    #[error("unusable source image: {0}")]
    Image(String),
    #[error("invalid --params JSON: {0}")]
    Params(serde_json::Error),
    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => EXIT_ENGINE,
            CliError::Io(_) => EXIT_IO,
            CliError::Image(_) | CliError::Params(_) => EXIT_INPUT,
            CliError::Report(_) => EXIT_REPORT,
        }
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Io(msg) => CliError::Io(msg),
            EngineError::InvalidInput(msg) => CliError::Image(msg),
            other => CliError::Engine(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{\"passes\": ").unwrap_err()
    }

    // -- Routing --

    #[test]
    fn unknown_pipeline_is_an_engine_failure() {
        let err = CliError::from(EngineError::UnknownPipeline("bump".into()));
        assert_eq!(err.exit_code(), EXIT_ENGINE);
        assert!(err.to_string().contains("bump"));
    }

    #[test]
    fn missing_source_routes_to_io() {
        let err = CliError::from(EngineError::Io("seeds.png: not found".into()));
        assert_eq!(err.exit_code(), EXIT_IO);
        assert_eq!(err.to_string(), "seeds.png: not found");
    }

    #[test]
    fn non_rgb_source_routes_to_input() {
        let err = CliError::from(EngineError::InvalidInput("got Rgba8".into()));
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.to_string().starts_with("unusable source image"));
        assert!(err.to_string().contains("Rgba8"));
    }

    #[test]
    fn shape_errors_stay_engine_failures() {
        let err = CliError::from(EngineError::InvalidDimensions);
        assert_eq!(err.exit_code(), EXIT_ENGINE);
    }

    // -- JSON --

    #[test]
    fn bad_params_share_the_input_code() {
        let err = CliError::Params(json_error());
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.to_string().starts_with("invalid --params JSON"));
    }

    #[test]
    fn question_mark_on_serde_error_is_a_report_failure() {
        fn report() -> Result<(), CliError> {
            Err(json_error())?
        }
        assert_eq!(report().map_err(|e| e.exit_code()), Err(EXIT_REPORT));
    }

    #[test]
    fn exit_codes_are_distinct_from_clap() {
        let codes = [EXIT_ENGINE, EXIT_IO, EXIT_INPUT, EXIT_REPORT];
        assert!(codes.iter().all(|&c| c != 0 && c != 2));
    }
}
