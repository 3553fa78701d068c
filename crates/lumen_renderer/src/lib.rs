//! Lumen Renderer - CPU Monte Carlo path tracing.
//!
//! Traces camera rays through a read-only [`Scene`] with a recursive
//! integrator (Lambertian, mirror, Fresnel glass, emitters), renders row
//! blocks on scoped OS threads, and tone maps the result into an 8-bit image.

mod camera;
mod config;
mod error;
mod integrator;
mod output;
mod renderer;
mod sampler;
mod tiles;
mod tone_map;

pub use camera::{PinholeCamera, SamplePattern, ViewRays};
pub use config::{RenderConfig, ShadingMode, DEFAULT_MAX_DEPTH, DEFAULT_SAMPLES_PER_PIXEL, MIN_WORKERS};
pub use error::{RenderError, RenderResult};
pub use integrator::{
    reflect, refract, russian_roulette, schlick_reflectance, Integrator, Radiance, GLASS_IOR,
    MAX_SURVIVAL_PROBABILITY,
};
pub use output::{encode_ppm, write_image, write_ppm};
pub use renderer::{render, render_image, render_linear, render_with_config, LinearImage};
pub use sampler::{cosine_weighted_direction, orthonormal_basis, HemisphereSampler};
pub use tiles::{row_blocks, worker_count, RowBlock};
pub use tone_map::{linear_to_gamma, tone_map};

/// Re-export the scene and math types the public API is expressed in
pub use lumen_core::{Color, Scene};
pub use lumen_math::{Ray, Vec3};
