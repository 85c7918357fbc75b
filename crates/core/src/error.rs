//! Error types for the force-sampler core.

use thiserror::Error;

/// Errors produced by grid construction, engines, pipelines and image I/O.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero, or the area overflowed `usize`.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// Two grids (or a grid and a raw buffer) had incompatible dimensions.
    #[error("dimension mismatch: ({lhs_w}, {lhs_h}) vs ({rhs_w}, {rhs_h})")]
    DimensionMismatch {
        lhs_w: usize,
        lhs_h: usize,
        rhs_w: usize,
        rhs_h: usize,
    },

    /// An (x, y) coordinate was outside the grid bounds.
    #[error("index ({x}, {y}) out of bounds for grid of size ({width}, {height})")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// No engine is registered under the given name.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),

    /// No pipeline is registered under the given name.
    #[error("unknown pipeline: {0}")]
    UnknownPipeline(String),

    /// The source image could not be used (corrupt data, wrong channel layout).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(String),
}
