//! Lumen command line renderer.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use lumen_core::build_room;
use lumen_renderer::{render_with_config, PinholeCamera, RenderConfig};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Lumen");

    let mut config = RenderConfig::default()
        .with_samples(args.samples)
        .with_max_depth(args.max_depth)
        .with_shading(args.shading.into());
    if let Some(threads) = args.threads {
        config = config.with_workers(threads);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let scene = build_room();
    let camera = PinholeCamera::room().with_pattern(args.pattern.into());

    render_with_config(&scene, &camera, args.width, args.height, &config, &args.output)
        .with_context(|| format!("Failed to render {}", args.output.display()))?;

    Ok(())
}
