//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable, PrimitiveKind},
    Color, Material,
};
use lumen_math::{Interval, Ray, Vec3, Vec3Ext};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    color: Color,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f64, color: Color, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            color,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn material(&self) -> Material {
        self.material
    }

    /// Both ray parameters where the ray line crosses the sphere.
    ///
    /// Geometric solution: project the center onto the ray (`t_ca`), compare
    /// the squared closest-approach distance with `r^2`, and step back and
    /// forth by the half chord `t_hc`. Returns `None` when the sphere lies
    /// entirely behind an outside origin or the ray passes beside it.
    /// A tangent ray yields two equal roots.
    pub fn roots(&self, ray: &Ray) -> Option<(f64, f64)> {
        let l = self.center - ray.origin();
        let r2 = self.radius * self.radius;
        let l2 = l.dot(l);

        let t_ca = l.dot(ray.direction());
        if t_ca < 0.0 && l2 > r2 {
            return None;
        }

        let d2 = l2 - t_ca * t_ca;
        if d2 > r2 {
            return None;
        }

        let t_hc = (r2 - d2).sqrt();
        Some((t_ca - t_hc, t_ca + t_hc))
    }

    /// Smallest positive hit distance.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let (t0, t1) = self.roots(ray)?;
        if t0 > 0.0 {
            Some(t0)
        } else if t1 > 0.0 {
            Some(t1)
        } else {
            None
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let Some((t0, t1)) = self.roots(ray) else {
            return false;
        };

        // Find the nearest root in the acceptable range
        let root = if ray_t.surrounds(t0) {
            t0
        } else if ray_t.surrounds(t1) {
            t1
        } else {
            return false;
        };

        rec.t = root;
        rec.p = ray.at(root);
        let outward_normal = (rec.p - self.center).normalize_or_self();
        rec.set_face_normal(ray, outward_normal);
        rec.color = self.color;
        rec.material = self.material;
        rec.kind = PrimitiveKind::Sphere;

        true
    }
}
