//! Noise generation for terrain, climate and material synthesis.
//!
//! Uses simdnoise for the underlying simplex evaluation.

mod fractal;
mod registry;

pub use fractal::{sample_fractal_noise, FractalNoiseConfig, NoiseKind};
pub use registry::{NoiseRegistry, NoiseRole};
