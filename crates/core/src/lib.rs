#![deny(unsafe_code)]
//! Core types for force-sampler: diffusing sparse artist-painted seeds into
//! dense direction (normal) and falloff (distance) fields.
//!
//! Provides the `Pixel` working-space sample, `Grid`/`PaddedGrid`, the
//! 3×3×3 `KernelPair`s, the `Convolution` operator, the iteration driver,
//! the normal and distance field modes (both `Engine`s), and the force-map
//! compositor.

pub mod compositor;
pub mod distance;
pub mod driver;
pub mod engine;
pub mod error;
pub mod grid;
pub mod kernel;
pub mod normal;
pub mod operator;
pub mod params;
pub mod pixel;

pub use compositor::{compose, compose_rgb8};
pub use distance::{distance_field, DistanceField, DistanceParams};
pub use engine::Engine;
pub use error::EngineError;
pub use grid::{Grid, PaddedGrid};
pub use kernel::KernelPair;
pub use normal::{normal_field, NormalField, NormalParams, NormalVariant};
pub use operator::{Convolution, OperatorConfig, OutputMode};
pub use pixel::Pixel;
