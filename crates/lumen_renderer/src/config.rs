//! Render configuration.

/// Samples per pixel used by [`crate::render`].
pub const DEFAULT_SAMPLES_PER_PIXEL: u32 = 64;

/// Maximum specular bounce depth used by [`crate::render`].
pub const DEFAULT_MAX_DEPTH: u32 = 8;

/// Lower bound on the number of render threads.
pub const MIN_WORKERS: usize = 4;

/// How diffuse surfaces are shaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Base surface color, no lighting
    Flat,
    /// Point light with hard shadows plus ambient (Whitted style)
    Lambertian,
    /// Path tracing with light sampling and Russian roulette
    #[default]
    MonteCarlo,
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Camera rays traced per pixel
    pub samples_per_pixel: u32,
    /// Maximum specular bounce depth
    pub max_depth: u32,
    /// Depth at which Russian roulette starts; follows `max_depth` when unset
    pub roulette_depth: Option<u32>,
    /// Diffuse shading strategy
    pub shading: ShadingMode,
    /// Minimum number of worker threads
    pub min_workers: usize,
    /// Exact number of worker threads, overriding hardware detection
    pub workers: Option<usize>,
    /// Base seed for the per-worker generators; fresh entropy when unset
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: DEFAULT_SAMPLES_PER_PIXEL,
            max_depth: DEFAULT_MAX_DEPTH,
            roulette_depth: None,
            shading: ShadingMode::MonteCarlo,
            min_workers: MIN_WORKERS,
            workers: None,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Set samples per pixel (at least one sample is always traced).
    pub fn with_samples(mut self, samples_per_pixel: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self
    }

    /// Set the maximum specular bounce depth.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Start Russian roulette at a depth other than `max_depth`.
    pub fn with_roulette_depth(mut self, depth: u32) -> Self {
        self.roulette_depth = Some(depth);
        self
    }

    /// Set the shading mode.
    pub fn with_shading(mut self, shading: ShadingMode) -> Self {
        self.shading = shading;
        self
    }

    /// Use exactly `workers` render threads.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Seed the per-worker generators for a reproducible render.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Depth at which Russian roulette starts.
    pub fn roulette_depth(&self) -> u32 {
        self.roulette_depth.unwrap_or(self.max_depth)
    }

    /// Samples per pixel, never zero.
    pub fn effective_samples(&self) -> u32 {
        self.samples_per_pixel.max(1)
    }
}
