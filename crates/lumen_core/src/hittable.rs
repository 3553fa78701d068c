//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Color, Material};
use lumen_math::{Interval, Ray, Vec3};

/// Which kind of primitive produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveKind {
    #[default]
    Triangle,
    Sphere,
}

/// Record of a ray-object intersection.
///
/// Created fresh for every query and owned by the caller's stack frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Flat surface color
    pub color: Color,
    /// Material at the intersection point
    pub material: Material,
    /// Primitive that was hit
    pub kind: PrimitiveKind,
}

impl HitRecord {
    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object within the given interval.
    ///
    /// Returns true if hit, and fills in the hit record.
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool;
}
