use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_renderer::{SamplePattern, ShadingMode, DEFAULT_MAX_DEPTH, DEFAULT_SAMPLES_PER_PIXEL};
use std::path::PathBuf;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Diffuse shading strategy
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shading {
    /// Base color only
    Flat,
    /// Point light, hard shadows and ambient
    Lambertian,
    /// Full path tracing
    MonteCarlo,
}

impl From<Shading> for ShadingMode {
    fn from(shading: Shading) -> Self {
        match shading {
            Shading::Flat => ShadingMode::Flat,
            Shading::Lambertian => ShadingMode::Lambertian,
            Shading::MonteCarlo => ShadingMode::MonteCarlo,
        }
    }
}

/// Sub-pixel sample placement
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Pattern {
    Stratified,
    Uniform,
    NRooks,
}

impl From<Pattern> for SamplePattern {
    fn from(pattern: Pattern) -> Self {
        match pattern {
            Pattern::Stratified => SamplePattern::Stratified,
            Pattern::Uniform => SamplePattern::Uniform,
            Pattern::NRooks => SamplePattern::NRooks,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "Render the Lumen room scene with a Monte Carlo path tracer")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 512)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 512)]
    pub height: u32,

    /// Output file (.ppm, or any format the image crate can encode)
    #[arg(short, long, default_value = "render.ppm")]
    pub output: PathBuf,

    /// Samples per pixel
    #[arg(short, long, default_value_t = DEFAULT_SAMPLES_PER_PIXEL)]
    pub samples: u32,

    /// Maximum specular bounce depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: u32,

    /// Diffuse shading strategy
    #[arg(long, value_enum, default_value_t = Shading::MonteCarlo)]
    pub shading: Shading,

    /// Sub-pixel sample pattern
    #[arg(long, value_enum, default_value_t = Pattern::Stratified)]
    pub pattern: Pattern,

    /// Number of render threads (defaults to the available parallelism, at least 4)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Seed for a reproducible render
    #[arg(long)]
    pub seed: Option<u64>,

    /// Logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}
