//! The scene aggregate queried by the integrator.
//!
//! A scene is built once and then only read: every query takes `&self`, so a
//! single scene can be shared by all render threads without locking.

use crate::{
    hittable::{HitRecord, Hittable},
    Color, Primitive,
};
use lumen_math::{Interval, Ray, Vec3};

/// Primitives plus global lighting parameters.
#[derive(Debug, Clone)]
pub struct Scene {
    primitives: Vec<Primitive>,
    /// Indices into `primitives` of emissive primitives
    lights: Vec<usize>,

    /// Point light used for shadow tests and direct lighting
    pub light_position: Vec3,
    pub light_color: Color,
    pub light_intensity: f64,

    /// Ambient term applied to unlit diffuse surfaces
    pub ambient: f64,

    /// Radiance returned for rays that escape the scene
    pub background: Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            primitives: Vec::new(),
            lights: Vec::new(),
            light_position: Vec3::new(2.0, 2.0, 4.0 - 1e-4),
            light_color: Color::splat(0.9),
            light_intensity: 5.0,
            ambient: 0.01,
            background: Color::splat(0.05),
        }
    }
}

impl Scene {
    /// Create an empty scene with default lighting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the point light.
    pub fn with_light(mut self, position: Vec3, color: Color, intensity: f64) -> Self {
        self.light_position = position;
        self.light_color = color;
        self.light_intensity = intensity;
        self
    }

    /// Set the ambient scalar.
    pub fn with_ambient(mut self, ambient: f64) -> Self {
        self.ambient = ambient;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Add a primitive, registering it as a light if it is emissive.
    ///
    /// Returns the primitive's index.
    pub fn add(&mut self, primitive: impl Into<Primitive>) -> usize {
        let primitive = primitive.into();
        let index = self.primitives.len();
        if primitive.material().is_emissive() {
            self.lights.push(index);
        }
        self.primitives.push(primitive);
        index
    }

    /// Emissive primitives, in insertion order.
    pub fn lights(&self) -> impl Iterator<Item = &Primitive> + '_ {
        self.lights.iter().map(move |&i| &self.primitives[i])
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Closest intersection over every primitive.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<HitRecord> {
        let mut rec = HitRecord::default();
        if self.hit(ray, Interval::FORWARD, &mut rec) {
            Some(rec)
        } else {
            None
        }
    }

    /// Whether any light-blocking primitive lies on `ray` closer than `max_distance`.
    ///
    /// Glass primitives never occlude.
    pub fn occluded(&self, ray: &Ray, max_distance: f64) -> bool {
        let range = Interval::FORWARD.with_max(max_distance);
        self.primitives
            .iter()
            .filter(|p| p.material().occludes())
            .any(|p| p.intersect(ray).is_some_and(|t| range.surrounds(t)))
    }

    /// Whether `point` is in shadow with respect to the point light.
    pub fn point_light_occluded(&self, point: Vec3) -> bool {
        let shadow = Ray::shadow_ray(point, self.light_position);
        let distance = shadow.origin().distance(self.light_position);
        self.occluded(&shadow, distance)
    }

    /// Distance to the nearest emissive primitive along `ray`.
    pub fn light_hit(&self, ray: &Ray) -> Option<f64> {
        self.lights()
            .filter_map(|light| light.intersect(ray))
            .min_by(f64::total_cmp)
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for primitive in &self.primitives {
            if primitive.hit(ray, ray_t.with_max(closest_so_far), rec) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, PrimitiveKind, Sphere, TriangleMesh};

    fn sphere(z: f64, material: Material) -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, z), 0.5, Vec3::splat(0.7), material)
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(scene.is_empty());
        assert!(scene.nearest_hit(&ray).is_none());
        assert!(!scene.occluded(&ray, f64::INFINITY));
        assert!(scene.light_hit(&ray).is_none());
    }

    #[test]
    fn test_nearest_hit_across_primitive_kinds() {
        let mut scene = Scene::new();
        scene.add(sphere(5.0, Material::Diffuse));
        // Quad at z = 2 facing -Z
        scene.add(TriangleMesh::quad(
            Vec3::new(-1.0, -1.0, 2.0),
            Vec3::new(-1.0, 1.0, 2.0),
            Vec3::new(1.0, 1.0, 2.0),
            Vec3::new(1.0, -1.0, 2.0),
            Vec3::splat(0.3),
            Material::Mirror,
        ));

        let ray = Ray::new(Vec3::new(0.1, 0.2, 0.0), Vec3::Z);
        let hit = scene.nearest_hit(&ray).expect("quad is in front of the sphere");
        assert!((hit.t - 2.0).abs() < 1e-9);
        assert_eq!(hit.kind, PrimitiveKind::Triangle);
        assert_eq!(hit.material, Material::Mirror);
    }

    #[test]
    fn test_glass_does_not_occlude() {
        let mut scene = Scene::new();
        scene.add(sphere(2.0, Material::Glass));
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        assert!(scene.nearest_hit(&ray).is_some());
        assert!(!scene.occluded(&ray, 10.0));

        scene.add(sphere(4.0, Material::Diffuse));
        assert!(scene.occluded(&ray, 10.0));
        // Blocker beyond the light does not count
        assert!(!scene.occluded(&ray, 3.0));
    }

    #[test]
    fn test_lights_are_registered_on_add() {
        let mut scene = Scene::new();
        scene.add(sphere(2.0, Material::Diffuse));
        let light = scene.add(sphere(6.0, Material::Emissive));
        scene.add(sphere(4.0, Material::Emissive));

        assert_eq!(light, 1);
        assert_eq!(scene.lights().count(), 2);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let t = scene.light_hit(&ray).expect("two lights on the axis");
        assert!((t - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_point_light_shadow() {
        let scene = {
            let mut scene = Scene::new().with_light(Vec3::new(0.0, 0.0, 10.0), Color::ONE, 1.0);
            scene.add(sphere(5.0, Material::Diffuse));
            scene
        };

        assert!(scene.point_light_occluded(Vec3::ZERO));
        assert!(!scene.point_light_occluded(Vec3::new(3.0, 0.0, 0.0)));
    }
}
