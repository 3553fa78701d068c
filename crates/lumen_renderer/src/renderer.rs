//! Parallel image rendering.
//!
//! The image is split into row blocks, one per worker. Workers run on scoped
//! OS threads, each writing only its own disjoint slice of the framebuffer
//! and owning its own generator and integrator. The scene and camera are
//! shared read-only. Once every worker has joined, the per-block maxima are
//! reduced and the framebuffer is tone mapped.

use crate::{
    row_blocks, tone_map, worker_count, write_image, Integrator, RenderConfig, RenderError, RenderResult,
    RowBlock, ViewRays,
};
use lumen_core::{Color, Scene};
use lumen_math::Vec3Ext;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::thread;
use std::time::Instant;

/// Averaged linear radiance per pixel, before tone mapping.
#[derive(Debug, Clone)]
pub struct LinearImage {
    pub width: u32,
    pub height: u32,
    /// Row-major, top row first
    pub pixels: Vec<Color>,
    /// Largest channel value over the whole image
    pub max_value: f64,
}

impl LinearImage {
    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Tone map into interleaved RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        tone_map(&self.pixels, self.max_value)
    }
}

/// What one worker reports after finishing its block.
#[derive(Debug, Clone, Copy, Default)]
struct BlockStats {
    max_value: f64,
    rays_traced: u64,
    escaped: u64,
}

/// SplitMix64 finalizer.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed for one worker, distinct per worker index and block start row.
fn worker_seed(base: u64, block: &RowBlock) -> u64 {
    mix(base ^ mix(block.index as u64) ^ mix(u64::from(block.rows.start) << 32))
}

#[allow(clippy::too_many_arguments)]
fn render_block(
    block: &RowBlock,
    pixels: &mut [Color],
    scene: &Scene,
    camera: &dyn ViewRays,
    width: u32,
    height: u32,
    config: &RenderConfig,
    seed: u64,
) -> BlockStats {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut integrator = Integrator::new(config);
    let samples = config.effective_samples();
    let mut stats = BlockStats::default();

    let rows = pixels.chunks_mut(width as usize);
    for (y, row) in block.rows.clone().zip(rows) {
        for (x, pixel) in (0..width).zip(row.iter_mut()) {
            let rays = camera.generate_random_view_rays(x, y, width, height, samples, &mut rng);

            let mut sum = Color::ZERO;
            for ray in &rays {
                let radiance = integrator.trace(ray, scene, &mut rng);
                if !radiance.hit {
                    stats.escaped += 1;
                }
                sum += radiance.color;
            }

            *pixel = sum / samples as f64;
            stats.max_value = stats.max_value.max(pixel.max_channel());
        }
    }

    stats.rays_traced = integrator.rays_traced();
    stats
}

/// Render the linear radiance image.
pub fn render_linear(
    scene: &Scene,
    camera: &dyn ViewRays,
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> RenderResult<LinearImage> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }

    let workers = config.workers.unwrap_or_else(|| worker_count(config.min_workers));
    let blocks = row_blocks(height, workers);
    let base_seed = config.seed.unwrap_or_else(rand::random);

    log::info!(
        "Rendering {}x{} at {} spp on {} threads ({} primitives)",
        width,
        height,
        config.effective_samples(),
        blocks.len(),
        scene.len()
    );
    let start = Instant::now();

    let mut pixels = vec![Color::ZERO; width as usize * height as usize];

    let results: Vec<thread::Result<BlockStats>> = thread::scope(|s| {
        let mut rest = pixels.as_mut_slice();
        let mut handles = Vec::with_capacity(blocks.len());

        for block in &blocks {
            let (slice, tail) = std::mem::take(&mut rest).split_at_mut(block.pixel_count(width));
            rest = tail;
            let seed = worker_seed(base_seed, block);
            handles.push(s.spawn(move || render_block(block, slice, scene, camera, width, height, config, seed)));
        }

        handles.into_iter().map(|handle| handle.join()).collect()
    });

    let mut max_value = 0.0_f64;
    let mut rays_traced = 0;
    let mut escaped = 0;
    for (block, result) in blocks.iter().zip(results) {
        let stats = result.map_err(|_| RenderError::WorkerPanicked(block.index))?;
        log::debug!(
            "Block {} (rows {}..{}): {} rays, max {:.4}",
            block.index,
            block.rows.start,
            block.rows.end,
            stats.rays_traced,
            stats.max_value
        );
        max_value = max_value.max(stats.max_value);
        rays_traced += stats.rays_traced;
        escaped += stats.escaped;
    }

    let elapsed = start.elapsed();
    log::info!(
        "Rendered in {:.2}s: {} rays ({:.2} Mrays/s), {} camera rays escaped",
        elapsed.as_secs_f64(),
        rays_traced,
        rays_traced as f64 / elapsed.as_secs_f64().max(1e-9) / 1e6,
        escaped
    );
    if max_value <= 0.0 {
        log::warn!("Image is completely black");
    }

    Ok(LinearImage {
        width,
        height,
        pixels,
        max_value,
    })
}

/// Render and tone map into interleaved RGB bytes.
pub fn render_image(
    scene: &Scene,
    camera: &dyn ViewRays,
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> RenderResult<Vec<u8>> {
    let image = render_linear(scene, camera, width, height, config)?;
    Ok(image.to_rgb8())
}

/// Render with an explicit configuration and write the image to `output_path`.
pub fn render_with_config(
    scene: &Scene,
    camera: &dyn ViewRays,
    width: u32,
    height: u32,
    config: &RenderConfig,
    output_path: impl AsRef<Path>,
) -> RenderResult<()> {
    let rgb = render_image(scene, camera, width, height, config)?;
    let output_path = output_path.as_ref();
    write_image(output_path, width, height, &rgb)?;
    log::info!("Wrote {}", output_path.display());
    Ok(())
}

/// Render with the default configuration and write the image to `output_path`.
pub fn render(
    scene: &Scene,
    camera: &dyn ViewRays,
    width: u32,
    height: u32,
    output_path: impl AsRef<Path>,
) -> RenderResult<()> {
    render_with_config(scene, camera, width, height, &RenderConfig::default(), output_path)
}
