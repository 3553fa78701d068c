//! Recursive radiance estimation.
//!
//! Implements the light-transport rules used by every shading mode:
//! - Mirror: perfect reflection, recursed until `max_depth`
//! - Glass: Schlick-weighted choice between reflection and refraction
//! - Diffuse: local shading (flat, Lambertian) or a Monte Carlo estimate
//!   combining one light-sampled direct term with a recursive indirect term
//!   terminated by Russian roulette
//! - Emissive: the surface color, no recursion

use crate::{HemisphereSampler, RenderConfig, ShadingMode};
use lumen_core::{Color, HitRecord, Material, Scene};
use lumen_math::{Ray, Vec3, Vec3Ext, RAY_EPSILON};
use rand::{Rng, RngCore};

/// Refractive index of glass surfaces.
pub const GLASS_IOR: f64 = 1.5;

/// Upper bound on the Russian roulette survival probability.
pub const MAX_SURVIVAL_PROBABILITY: f64 = 0.95;

/// Result of tracing one ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Radiance {
    /// Estimated radiance arriving at the ray origin
    pub color: Color,
    /// False when the ray escaped the scene and `color` is the background
    pub hit: bool,
}

/// Reflect a direction about a normal.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    (d - n * (2.0 * d.dot(n))).normalize_or_self()
}

/// Refract `d` through a surface with normal `n` facing against `d`.
///
/// `eta` is the ratio of refractive indices (incident over transmitted).
/// Returns `None` on total internal reflection.
#[inline]
pub fn refract(d: Vec3, n: Vec3, eta: f64) -> Option<Vec3> {
    let cos_theta = -d.dot(n);
    let k = 1.0 - eta * eta * (1.0 - cos_theta * cos_theta);
    if k < 0.0 {
        return None;
    }
    Some((d * eta + n * (eta * cos_theta - k.sqrt())).normalize_or_self())
}

/// Schlick's approximation of Fresnel reflectance.
#[inline]
pub fn schlick_reflectance(cos_theta: f64, ior: f64) -> f64 {
    let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cos_theta).powi(5)
}

/// Decide whether a path continues past a diffuse bounce.
///
/// Survival probability is the brightest albedo channel, capped at
/// [`MAX_SURVIVAL_PROBABILITY`]. Returns the survival probability when the
/// path continues (callers divide by it) or `None` when it terminates.
pub fn russian_roulette(albedo: Color, rng: &mut dyn RngCore) -> Option<f64> {
    let survival = albedo.max_channel().min(MAX_SURVIVAL_PROBABILITY);
    if survival <= 0.0 {
        return None;
    }
    if rng.gen::<f64>() >= survival {
        None
    } else {
        Some(survival)
    }
}

/// Per-worker path tracer.
///
/// Holds only configuration and a ray counter, so each render thread owns its
/// own instance.
#[derive(Debug, Clone)]
pub struct Integrator {
    max_depth: u32,
    roulette_depth: u32,
    shading: ShadingMode,
    rays_traced: u64,
}

impl Integrator {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            roulette_depth: config.roulette_depth(),
            shading: config.shading,
            rays_traced: 0,
        }
    }

    /// Number of rays traced by this integrator, including secondary bounces.
    pub fn rays_traced(&self) -> u64 {
        self.rays_traced
    }

    /// Estimate the radiance arriving along `ray`.
    pub fn trace(&mut self, ray: &Ray, scene: &Scene, rng: &mut dyn RngCore) -> Radiance {
        self.trace_path(ray, scene, 0, rng)
    }

    fn trace_path(&mut self, ray: &Ray, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Radiance {
        self.rays_traced += 1;

        let Some(rec) = scene.nearest_hit(ray) else {
            return Radiance {
                color: scene.background,
                hit: false,
            };
        };

        let can_recurse = depth < self.max_depth;
        let color = match rec.material {
            Material::Emissive => rec.color,
            Material::Mirror if can_recurse => self.shade_mirror(ray, &rec, scene, depth, rng),
            Material::Glass if can_recurse => self.shade_glass(ray, &rec, scene, depth, rng),
            // Out of specular depth: shade the surface locally
            Material::Diffuse | Material::Mirror | Material::Glass => {
                self.shade_diffuse(&rec, scene, depth, rng)
            }
        };

        Radiance { color, hit: true }
    }

    fn shade_mirror(
        &mut self,
        ray: &Ray,
        rec: &HitRecord,
        scene: &Scene,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        let reflected = Ray::offset(rec.p, reflect(ray.direction(), rec.normal));
        self.trace_path(&reflected, scene, depth + 1, rng).color
    }

    fn shade_glass(
        &mut self,
        ray: &Ray,
        rec: &HitRecord,
        scene: &Scene,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        // rec.normal already faces the incoming ray; front_face tells which side we are on
        let eta = if rec.front_face { 1.0 / GLASS_IOR } else { GLASS_IOR };
        let n = rec.normal;
        let d = ray.direction();

        let cos_theta = (-d.dot(n)).clamp(0.0, 1.0);
        let reflectance = schlick_reflectance(cos_theta, GLASS_IOR);

        if rng.gen::<f64>() >= reflectance {
            if let Some(refracted) = refract(d, n, eta) {
                let transmitted = Ray::offset(rec.p, refracted);
                return rec.color * self.trace_path(&transmitted, scene, depth + 1, rng).color;
            }
            // Total internal reflection falls through to the mirror branch
        }

        let reflected = Ray::offset(rec.p, reflect(d, n));
        self.trace_path(&reflected, scene, depth + 1, rng).color
    }

    fn shade_diffuse(&mut self, rec: &HitRecord, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
        match self.shading {
            ShadingMode::Flat => rec.color,
            ShadingMode::Lambertian => Self::shade_lambertian(rec, scene),
            ShadingMode::MonteCarlo => self.shade_monte_carlo(rec, scene, depth, rng),
        }
    }

    /// Point-light shading with a hard shadow test.
    fn shade_lambertian(rec: &HitRecord, scene: &Scene) -> Color {
        if scene.point_light_occluded(rec.p) {
            return rec.color * scene.ambient;
        }

        let to_light = scene.light_position - rec.p;
        let light_dir = to_light.normalize_or_self();
        let diffuse = rec.normal.dot(light_dir).max(0.0);
        let intensity = scene.light_intensity * diffuse / to_light.length_squared();

        rec.color * (scene.light_color * intensity + Color::splat(scene.ambient))
    }

    /// One-sample estimate of direct plus indirect diffuse lighting.
    fn shade_monte_carlo(&mut self, rec: &HitRecord, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
        let albedo = rec.color;

        let Some(sample) = HemisphereSampler::new(rec.p, 1, rec.normal, rng).next() else {
            return albedo * scene.ambient;
        };

        let direct = Self::sample_direct(rec, &sample, scene);

        let mut weight = 1.0;
        if depth >= self.roulette_depth {
            match russian_roulette(albedo, rng) {
                Some(survival) => weight = 1.0 / survival,
                None => return direct,
            }
        }

        // Cosine-weighted sampling cancels the cosine term: indirect = albedo * incoming
        let incoming = self.trace_path(&sample, scene, depth + 1, rng).color;
        direct + albedo * incoming * weight
    }

    /// Direct light carried by `sample` when it reaches an unoccluded emitter,
    /// ambient otherwise.
    ///
    /// The sample already starts `RAY_EPSILON` off the surface, so it doubles
    /// as the shadow ray toward whatever emitter it hits.
    fn sample_direct(rec: &HitRecord, sample: &Ray, scene: &Scene) -> Color {
        let albedo = rec.color;
        match scene.light_hit(sample) {
            Some(t_light) if !scene.occluded(sample, t_light - RAY_EPSILON) => {
                let cos_theta = rec.normal.dot(sample.direction()).max(0.0);
                let irradiance = scene.light_color * (scene.light_intensity / (t_light * t_light));
                albedo * irradiance * cos_theta
            }
            _ => albedo * scene.ambient,
        }
    }
}
