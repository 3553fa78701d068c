//! End-to-end rendering tests.

use lumen_core::{build_room, Material, Sphere};
use lumen_renderer::{
    render_image, render_linear, render_with_config, row_blocks, tone_map, Color, PinholeCamera, RenderConfig,
    Scene, SamplePattern, ShadingMode, Vec3,
};

fn fast_config() -> RenderConfig {
    RenderConfig::default().with_samples(2).with_max_depth(2).with_seed(1234)
}

#[test]
fn empty_scene_renders_background_everywhere() {
    let background = Color::new(0.1, 0.4, 0.9);
    let scene = Scene::new().with_background(background);
    let camera = PinholeCamera::room();

    let image = render_linear(&scene, &camera, 10, 7, &fast_config()).unwrap();
    assert!(image.pixels.iter().all(|&p| p == background));
    assert_eq!(image.max_value, 0.9);

    let rgb = render_image(&scene, &camera, 10, 7, &fast_config()).unwrap();
    let expected = tone_map(&[background], 0.9);
    assert_eq!(expected[2], 255);
    assert_eq!(rgb.len(), 10 * 7 * 3);
    assert!(rgb.chunks(3).all(|px| px == expected.as_slice()));
}

#[test]
fn mirror_sphere_without_bounces_is_ambient_scaled() {
    let base = Color::new(0.8, 0.6, 0.4);
    let mut scene = Scene::new().with_background(Color::ZERO).with_ambient(0.1);
    // Large enough to fill the whole view
    scene.add(Sphere::new(Vec3::new(3.0, 2.0, 2.0), 2.4, base, Material::Mirror));

    let camera = PinholeCamera::room();
    let config = fast_config().with_max_depth(0).with_shading(ShadingMode::MonteCarlo);

    let image = render_linear(&scene, &camera, 8, 8, &config).unwrap();
    for pixel in &image.pixels {
        assert!((*pixel - base * 0.1).length() < 1e-12, "pixel = {pixel}");
    }
}

#[test]
fn every_sample_pattern_renders_the_room() {
    let scene = build_room();
    for pattern in [SamplePattern::Stratified, SamplePattern::Uniform, SamplePattern::NRooks] {
        let camera = PinholeCamera::room().with_pattern(pattern);
        let image = render_linear(&scene, &camera, 16, 12, &fast_config()).unwrap();
        assert_eq!(image.pixels.len(), 16 * 12);
        assert!(image.max_value > 0.0);
        assert!(image.pixels.iter().all(|p| p.is_finite() && p.min_element() >= 0.0));
    }
}

#[test]
fn thread_count_does_not_change_shading_determinism() {
    // Flat shading uses no randomness beyond pixel jitter, which stays inside
    // surfaces far from any edge
    let mut scene = Scene::new().with_background(Color::ZERO);
    scene.add(Sphere::new(Vec3::new(3.0, 2.0, 2.0), 2.4, Color::new(0.3, 0.5, 0.7), Material::Diffuse));
    let camera = PinholeCamera::room();

    for workers in [1, 2, 5, 32] {
        let config = fast_config().with_shading(ShadingMode::Flat).with_workers(workers);
        let image = render_linear(&scene, &camera, 9, 9, &config).unwrap();
        assert!(image.pixels.iter().all(|&p| p == Color::new(0.3, 0.5, 0.7)));
    }
}

#[test]
fn row_blocks_partition_heights() {
    for height in 0..40 {
        for workers in 1..12 {
            let covered: Vec<u32> = row_blocks(height, workers).into_iter().flat_map(|b| b.rows).collect();
            assert_eq!(covered, (0..height).collect::<Vec<_>>());
        }
    }
}

#[test]
fn writes_ppm_file() {
    let scene = Scene::new().with_background(Color::splat(0.3));
    let camera = PinholeCamera::room();
    let path = std::env::temp_dir().join(format!("lumen_render_test_{}.ppm", std::process::id()));

    render_with_config(&scene, &camera, 5, 3, &fast_config(), &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let header = b"P6\n5 3\n255\n";
    assert_eq!(&bytes[..header.len()], header);
    assert_eq!(bytes.len(), header.len() + 5 * 3 * 3);
    assert!(bytes[header.len()..].iter().all(|&b| b == 255));
}
